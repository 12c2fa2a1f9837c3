//! Error types for the ASCII art pipeline.

use crate::raster::RasterError;

/// Errors produced while building luminance fields, calibrating palettes
/// or composing art.
///
/// None of these are retryable: the caller has to fix the symbol set, the
/// image or the grid size and call again.
#[derive(Debug, thiserror::Error)]
pub enum ArtError {
    /// Calibration was asked to build a palette from no symbols.
    #[error("palette is empty: at least one symbol is required")]
    EmptyPalette,

    /// The source image has no pixels.
    #[error("invalid image: {width}x{height} has no pixels")]
    InvalidImage { width: u32, height: u32 },

    /// The RGBA buffer does not match the declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected} (width * height * 4)")]
    PixelBufferSize { expected: usize, actual: usize },

    /// The requested grid has no columns or no rows.
    #[error("degenerate grid {cols}x{rows}: columns and rows must be at least 1")]
    DegenerateGrid { cols: u32, rows: u32 },

    /// A cell's sampling rectangle covers no pixels.
    #[error("cell ({col}, {row}) covers no pixels; reduce the grid size")]
    EmptyCell { col: u32, row: u32 },

    /// The rasterizer could not measure or draw a symbol.
    #[error("failed to rasterize symbol {symbol:?}: {source}")]
    Glyph {
        symbol: char,
        #[source]
        source: RasterError,
    },
}
