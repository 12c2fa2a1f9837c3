//! `fontdue`-backed rasterizer and monospace font discovery.

use fontdue::{Font, FontSettings};
use std::path::{Path, PathBuf};

use super::{GlyphCanvas, GlyphMetrics, GlyphRasterizer, RasterError};

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 8.0;

/// Monospace fonts tried, in order, when no font path is configured.
/// A leading `~/` is expanded to the home directory.
pub const MONOSPACE_FONT_PATHS: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/truetype/ubuntu/UbuntuMono-R.ttf",
    "~/.local/share/fonts/DejaVuSansMono.ttf",
    // macOS
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "/Library/Fonts/Courier New.ttf",
    // Windows
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// Rasterizer that renders glyphs from a TrueType/OpenType font at a fixed
/// pixel size.
pub struct FontRasterizer {
    font: Font,
    size: f32,
    source: Option<PathBuf>,
}

impl std::fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRasterizer")
            .field("name", &self.font.name())
            .field("size", &self.size)
            .field("source", &self.source)
            .finish()
    }
}

impl FontRasterizer {
    /// Parse a font from memory.
    pub fn from_bytes(data: &[u8], size: f32) -> Result<Self, RasterError> {
        Self::parse(data, size, None)
    }

    /// Load a font file.
    pub fn from_path(path: &Path, size: f32) -> Result<Self, RasterError> {
        let data = std::fs::read(path).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data, size, Some(path.to_path_buf()))
    }

    /// Load `path` if given, otherwise the first font found by [`find_font`].
    pub fn discover(path: Option<&Path>, size: f32) -> Result<Self, RasterError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => find_font()?,
        };
        let rasterizer = Self::from_path(&path, size)?;
        log::info!("Using font {} at {}px", path.display(), size);
        Ok(rasterizer)
    }

    fn parse(data: &[u8], size: f32, source: Option<PathBuf>) -> Result<Self, RasterError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(RasterError::InvalidSize(size));
        }
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|e| {
            RasterError::InvalidFont {
                path: source.clone().unwrap_or_else(|| PathBuf::from("<memory>")),
                message: e.to_string(),
            }
        })?;
        Ok(Self { font, size, source })
    }

    /// Font size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// File the font was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn check_glyph(&self, symbol: char) -> Result<(), RasterError> {
        // Index 0 is the .notdef glyph; whitespace legitimately has no outline
        if self.font.lookup_glyph_index(symbol) == 0 && !symbol.is_whitespace() {
            return Err(RasterError::MissingGlyph(symbol));
        }
        Ok(())
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn measure(&self, symbol: char) -> Result<GlyphMetrics, RasterError> {
        self.check_glyph(symbol)?;
        let metrics = self.font.metrics(symbol, self.size);
        if metrics.width == 0 || metrics.height == 0 {
            return Ok(GlyphMetrics {
                advance: metrics.advance_width,
                ascent: 0.0,
                descent: 0.0,
            });
        }
        // fontdue reports ymin as the bitmap's bottom edge relative to the
        // baseline, positive upwards
        Ok(GlyphMetrics {
            advance: metrics.advance_width,
            ascent: (metrics.ymin + metrics.height as i32) as f32,
            descent: -metrics.ymin as f32,
        })
    }

    fn render(&self, symbol: char, canvas: &mut GlyphCanvas) -> Result<(), RasterError> {
        self.check_glyph(symbol)?;
        let (metrics, bitmap) = self.font.rasterize(symbol, self.size);
        if bitmap.is_empty() || metrics.width == 0 || metrics.height == 0 {
            return Ok(());
        }

        let baseline = canvas.baseline().round() as i32;
        let top = baseline - (metrics.ymin + metrics.height as i32);
        let left = metrics.xmin;

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let coverage = bitmap[gy * metrics.width + gx];
                canvas.blend_ink(left + gx as i32, top + gy as i32, coverage);
            }
        }
        Ok(())
    }
}

/// Locate a monospace font among [`MONOSPACE_FONT_PATHS`].
pub fn find_font() -> Result<PathBuf, RasterError> {
    let candidates: Vec<PathBuf> = MONOSPACE_FONT_PATHS.iter().map(|p| expand_home(p)).collect();
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => Ok(path.clone()),
        None => {
            log::warn!("No monospace font found in {} locations", candidates.len());
            Err(RasterError::FontNotFound {
                searched: candidates,
            })
        }
    }
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{BLACK, WHITE};

    #[test]
    fn test_invalid_size_rejected() {
        assert!(matches!(
            FontRasterizer::from_bytes(&[], 0.0),
            Err(RasterError::InvalidSize(_))
        ));
        assert!(matches!(
            FontRasterizer::from_bytes(&[], f32::NAN),
            Err(RasterError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = FontRasterizer::from_bytes(b"definitely not a font", 8.0);
        assert!(matches!(result, Err(RasterError::InvalidFont { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = FontRasterizer::from_path(Path::new("/nonexistent/font.ttf"), 8.0);
        assert!(matches!(result, Err(RasterError::Io { .. })));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/usr/a.ttf"), PathBuf::from("/usr/a.ttf"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/f.ttf"), home.join("f.ttf"));
        }
    }

    #[test]
    fn test_discovered_font_renders_ink() {
        // Only meaningful on machines with one of the known fonts installed
        let Ok(path) = find_font() else {
            return;
        };
        let Ok(raster) = FontRasterizer::from_path(&path, 16.0) else {
            return;
        };
        let metrics = raster.measure('@').unwrap();
        let (w, h) = metrics.canvas_size();
        let mut canvas = GlyphCanvas::new(w, h, metrics.baseline(h), WHITE, BLACK);
        raster.render('@', &mut canvas).unwrap();
        assert!(canvas.pixels().iter().any(|&b| b < 128));
    }
}
