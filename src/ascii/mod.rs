//! Image to ASCII art pipeline.
//!
//! 1. **Luminance** - RGBA pixels to normalized brightness ([`LuminanceField`])
//! 2. **Calibration** - render each symbol and measure it ([`calibrate`], [`Palette`])
//! 3. **Sizing** - pick the grid, optionally preserving aspect ([`resolve`])
//! 4. **Composition** - average each cell, pick the closest symbol ([`compose`])
//!
//! All of it is pure and synchronous; see [`crate::generator`] for the
//! request-coalescing host side.

mod charset;
mod compose;
mod dimensions;
mod error;
mod luminance;
mod palette;

pub use charset::{SymbolSet, BLOCKS_SYMBOLS, DETAILED_SYMBOLS, MINIMAL_SYMBOLS, STANDARD_SYMBOLS};
pub use compose::{compose, compose_art, ArtGrid};
pub use dimensions::{
    auto_size, resolve, GridAxis, GridRequest, GridSize, DEFAULT_CHAR_ASPECT_RATIO, DEFAULT_GRID,
};
pub use error::ArtError;
pub use luminance::{LuminanceField, Rect};
pub use palette::{calibrate, Palette, PaletteCache, PaletteEntry};
