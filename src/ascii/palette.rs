//! Calibrated brightness palettes.
//!
//! A palette is built by rendering every candidate symbol with the active
//! font and measuring how bright the result is. Ink coverage differs wildly
//! between symbols (a space versus `@`), and measuring it on the real font
//! keeps the ordering right across fonts and platforms.

use std::sync::Arc;

use super::{ArtError, LuminanceField};
use crate::raster::{GlyphCanvas, GlyphRasterizer, BLACK, WHITE};

/// One symbol and its calibrated brightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub symbol: char,
    pub brightness: f32,
}

/// Symbols sorted ascending by calibrated brightness.
///
/// Brightness values are normalized so that the darkest entry is `0.0` and
/// the brightest `1.0`. When every symbol measured the same, all entries are
/// `0.0`. Entries with equal brightness keep their calibration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from raw `(symbol, brightness)` measurements in
    /// calibration order.
    ///
    /// # Errors
    /// [`ArtError::EmptyPalette`] if `measurements` is empty.
    pub fn from_measurements(measurements: Vec<(char, f32)>) -> Result<Self, ArtError> {
        if measurements.is_empty() {
            return Err(ArtError::EmptyPalette);
        }

        let (min, max) = measurements
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &(_, l)| {
                (lo.min(l), hi.max(l))
            });
        let range = max - min;

        let mut entries: Vec<PaletteEntry> = measurements
            .into_iter()
            .map(|(symbol, raw)| PaletteEntry {
                symbol,
                brightness: if range > 0.0 { (raw - min) / range } else { 0.0 },
            })
            .collect();

        // Stable sort: ties keep calibration order
        entries.sort_by(|a, b| a.brightness.total_cmp(&b.brightness));

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a palette holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols from darkest to brightest.
    pub fn symbols(&self) -> String {
        self.entries.iter().map(|e| e.symbol).collect()
    }

    /// Symbol whose brightness is closest to `l`.
    ///
    /// Finds the first entry at least as bright as `l` and compares it with
    /// its darker neighbour; the darker one wins unless the brighter one is
    /// strictly closer. Values above the brightest entry map to it, values
    /// below the darkest map to it. Out-of-range input is never an error.
    pub fn closest(&self, l: f32) -> char {
        let i = self.entries.partition_point(|e| e.brightness < l);
        if i == self.entries.len() {
            return self.entries[i - 1].symbol;
        }
        if i == 0 {
            return self.entries[0].symbol;
        }
        let (prev, cur) = (&self.entries[i - 1], &self.entries[i]);
        if (l - cur.brightness).abs() < (l - prev.brightness).abs() {
            cur.symbol
        } else {
            prev.symbol
        }
    }
}

/// Calibrate a palette by rendering each symbol of `symbols` with
/// `rasterizer` and measuring its brightness.
///
/// Each symbol is drawn in black on a white canvas that just fits its ink
/// (see [`GlyphMetrics::canvas_size`](crate::raster::GlyphMetrics::canvas_size));
/// the canvas mean brightness is the symbol's raw value.
///
/// # Errors
/// * [`ArtError::EmptyPalette`] if `symbols` is empty
/// * [`ArtError::Glyph`] if the rasterizer fails on a symbol
pub fn calibrate<R>(symbols: &str, rasterizer: &R) -> Result<Palette, ArtError>
where
    R: GlyphRasterizer + ?Sized,
{
    if symbols.is_empty() {
        return Err(ArtError::EmptyPalette);
    }

    let measurements = symbols
        .chars()
        .map(|symbol| Ok((symbol, symbol_brightness(symbol, rasterizer)?)))
        .collect::<Result<Vec<_>, ArtError>>()?;

    let palette = Palette::from_measurements(measurements)?;
    log::debug!(
        "Calibrated palette: {}",
        palette
            .entries()
            .iter()
            .map(|e| format!("{}:{:.3}", e.symbol, e.brightness))
            .collect::<Vec<_>>()
            .join(" ")
    );
    Ok(palette)
}

fn symbol_brightness<R>(symbol: char, rasterizer: &R) -> Result<f32, ArtError>
where
    R: GlyphRasterizer + ?Sized,
{
    let glyph_err = |source| ArtError::Glyph { symbol, source };

    let metrics = rasterizer.measure(symbol).map_err(glyph_err)?;
    let (width, height) = metrics.canvas_size();
    let mut canvas = GlyphCanvas::new(width, height, metrics.baseline(height), WHITE, BLACK);
    rasterizer.render(symbol, &mut canvas).map_err(glyph_err)?;

    let field = LuminanceField::from_rgba(canvas.pixels(), width, height)?;
    Ok(field.mean())
}

/// Single-entry palette cache keyed by the symbol string.
///
/// Calibration renders every symbol, so the owner keeps the last palette and
/// only rebuilds it when the symbol string changes.
#[derive(Debug, Default)]
pub struct PaletteCache {
    current: Option<(String, Arc<Palette>)>,
}

impl PaletteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached palette for `symbols`, calibrating it first if the
    /// cache is empty or holds a different symbol string.
    pub fn get_or_calibrate<R>(
        &mut self,
        symbols: &str,
        rasterizer: &R,
    ) -> Result<Arc<Palette>, ArtError>
    where
        R: GlyphRasterizer + ?Sized,
    {
        if let Some((key, palette)) = &self.current {
            if key == symbols {
                return Ok(Arc::clone(palette));
            }
        }

        let palette = Arc::new(calibrate(symbols, rasterizer)?);
        self.current = Some((symbols.to_string(), Arc::clone(&palette)));
        Ok(palette)
    }

    /// Symbol string of the cached palette, if any.
    pub fn key(&self) -> Option<&str> {
        self.current.as_ref().map(|(key, _)| key.as_str())
    }

    /// Drop the cached palette, e.g. after the font changed.
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}
