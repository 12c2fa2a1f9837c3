//! RGBA to normalized brightness conversion.

use super::ArtError;

/// Axis-aligned sampling rectangle in field coordinates.
///
/// Coordinates may be fractional; only whole-pixel positions inside the
/// rectangle are sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Single-channel brightness buffer derived from a color image.
///
/// Each sample is in `[0, 1]`, stored row-major. The field is immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceField {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl LuminanceField {
    /// Build a field from an RGBA8 buffer (4 bytes per pixel, row-major).
    ///
    /// Each pixel is alpha-composited onto white before its channels are
    /// averaged, so a fully transparent pixel reads as white whatever its
    /// color bytes hold. The average is unweighted: `(r + g + b) / (3 * 255)`.
    ///
    /// # Errors
    /// * [`ArtError::InvalidImage`] if `width` or `height` is zero
    /// * [`ArtError::PixelBufferSize`] if `pixels.len() != width * height * 4`
    pub fn from_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Self, ArtError> {
        if width == 0 || height == 0 {
            return Err(ArtError::InvalidImage { width, height });
        }

        let pixel_count = width as usize * height as usize;
        let expected = pixel_count * 4;
        if pixels.len() != expected {
            return Err(ArtError::PixelBufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        let mut samples = Vec::with_capacity(pixel_count);
        for rgba in pixels.chunks_exact(4) {
            let alpha = rgba[3] as f32 / 255.0;
            let sum = blend_on_white(rgba[0], alpha)
                + blend_on_white(rgba[1], alpha)
                + blend_on_white(rgba[2], alpha);
            samples.push(sum / (3.0 * 255.0));
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Raw samples, row-major.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Rectangle covering the whole field.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Brightness at `(x, y)`, with both coordinates floored.
    ///
    /// # Panics
    /// Panics if the floored coordinates fall outside the field.
    pub fn get(&self, x: f32, y: f32) -> f32 {
        let (x, y) = (x.floor(), y.floor());
        assert!(
            x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32,
            "sample ({x}, {y}) outside {}x{} field",
            self.width,
            self.height
        );
        self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Mean brightness of the whole-pixel positions covered by `rect`.
    ///
    /// The scanned region is clamped to the field. Returns `None` when no
    /// whole-pixel position survives the clamp, e.g. for a zero-area
    /// rectangle, one lying entirely outside the field, or a sub-pixel
    /// rectangle that straddles no integer coordinate.
    pub fn average(&self, rect: Rect) -> Option<f32> {
        let (x0, x1) = span(rect.x, rect.width, self.width);
        let (y0, y1) = span(rect.y, rect.height, self.height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let stride = self.width as usize;
        let mut total = 0.0f64;
        for y in y0..y1 {
            let row = &self.samples[y * stride + x0..y * stride + x1];
            total += row.iter().map(|&s| s as f64).sum::<f64>();
        }

        let count = (x1 - x0) * (y1 - y0);
        Some((total / count as f64) as f32)
    }

    /// Mean brightness of the whole field.
    pub fn mean(&self) -> f32 {
        let total: f64 = self.samples.iter().map(|&s| s as f64).sum();
        (total / self.samples.len() as f64) as f32
    }

    /// A copy of this field with every sample replaced by `1 - s`.
    ///
    /// Useful on dark terminals, where bright glyph-free cells should show
    /// as dark.
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().map(|&s| 1.0 - s).collect(),
        }
    }
}

#[inline]
fn blend_on_white(channel: u8, alpha: f32) -> f32 {
    alpha * channel as f32 + (1.0 - alpha) * 255.0
}

/// Whole-pixel index range `[start, end)` covered by `[origin, origin + extent)`
/// after clamping to `[0, limit)`.
fn span(origin: f32, extent: f32, limit: u32) -> (usize, usize) {
    if !origin.is_finite() || !extent.is_finite() || extent <= 0.0 {
        return (0, 0);
    }
    let end = (origin + extent).min(limit as f32);
    if end <= 0.0 {
        return (0, 0);
    }
    let start = origin.max(0.0).ceil() as usize;
    let end = (end.ceil() as usize).min(limit as usize);
    (start, end)
}
