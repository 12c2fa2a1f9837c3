//! Glyph rasterization used to calibrate palettes.
//!
//! Calibration needs two things from a text renderer: the ink bounds of a
//! symbol and a picture of it. [`GlyphRasterizer`] captures exactly that, so
//! the palette code never depends on a particular font engine. The crate
//! ships [`FontRasterizer`], backed by `fontdue`.

mod canvas;
mod font;

pub use canvas::{GlyphCanvas, Rgba, BLACK, WHITE};
pub(crate) use font::expand_home;
pub use font::{find_font, FontRasterizer, DEFAULT_FONT_SIZE, MONOSPACE_FONT_PATHS};

use std::path::PathBuf;

/// Ink metrics of a single glyph, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    /// Horizontal advance of the glyph.
    pub advance: f32,
    /// Distance from the baseline up to the top of the ink.
    pub ascent: f32,
    /// Distance from the baseline down to the bottom of the ink. Negative when
    /// the ink sits entirely above the baseline (e.g. `-` or `^`).
    pub descent: f32,
}

impl GlyphMetrics {
    /// Canvas size that fits the glyph: `ceil(advance) x ceil(ascent + |descent|)`,
    /// never smaller than 1x1.
    pub fn canvas_size(&self) -> (u32, u32) {
        let width = self.advance.max(0.0).ceil() as u32;
        let height = (self.ascent + self.descent.abs()).max(0.0).ceil() as u32;
        (width.max(1), height.max(1))
    }

    /// Row of a `height`-pixel canvas on which the baseline sits so that any
    /// descender ends at the bottom edge.
    pub fn baseline(&self, height: u32) -> f32 {
        height as f32 - self.descent.max(0.0)
    }
}

/// A text renderer able to measure and draw single symbols.
pub trait GlyphRasterizer {
    /// Measure the ink bounds of `symbol` in the active font.
    fn measure(&self, symbol: char) -> Result<GlyphMetrics, RasterError>;

    /// Draw `symbol` into `canvas` with the canvas ink colour, placing the
    /// glyph's baseline on [`GlyphCanvas::baseline`].
    fn render(&self, symbol: char, canvas: &mut GlyphCanvas) -> Result<(), RasterError>;
}

impl<T: GlyphRasterizer + ?Sized> GlyphRasterizer for Box<T> {
    fn measure(&self, symbol: char) -> Result<GlyphMetrics, RasterError> {
        (**self).measure(symbol)
    }

    fn render(&self, symbol: char, canvas: &mut GlyphCanvas) -> Result<(), RasterError> {
        (**self).render(symbol, canvas)
    }
}

/// Errors raised by rasterizers and font loading.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// No font file was given and none of the known locations exists.
    #[error("no monospace font found; searched: {}", display_paths(.searched))]
    FontNotFound { searched: Vec<PathBuf> },

    #[error("failed to read font file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a usable font.
    #[error("failed to parse font '{}': {message}", .path.display())]
    InvalidFont { path: PathBuf, message: String },

    #[error("font size must be a positive number of pixels, got {0}")]
    InvalidSize(f32),

    /// The active font has no glyph for the symbol.
    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
