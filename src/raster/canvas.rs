//! Pixel canvas that rasterizers draw glyphs into.

/// RGBA colour, one byte per channel.
pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

/// RGBA8 drawing surface sized to fit one glyph.
///
/// The canvas starts filled with its background colour; rasterizers paint
/// ink coverage on top with [`GlyphCanvas::blend_ink`].
#[derive(Debug, Clone)]
pub struct GlyphCanvas {
    width: u32,
    height: u32,
    baseline: f32,
    ink: Rgba,
    pixels: Vec<u8>,
}

impl GlyphCanvas {
    /// Create a `width` x `height` canvas filled with `background`.
    pub fn new(width: u32, height: u32, baseline: f32, background: Rgba, ink: Rgba) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&background);
        }
        Self {
            width,
            height,
            baseline,
            ink,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row (from the top) on which the glyph baseline must be placed.
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mix the ink colour into the pixel at `(x, y)` with `coverage` in
    /// `0..=255`. Positions outside the canvas are clipped.
    pub fn blend_ink(&mut self, x: i32, y: i32, coverage: u8) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 || coverage == 0 {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let f = coverage as f32 / 255.0;
        for (dst, &ink) in self.pixels[offset..offset + 4].iter_mut().zip(self.ink.iter()) {
            *dst = (f * ink as f32 + (1.0 - f) * *dst as f32).round() as u8;
        }
    }
}
