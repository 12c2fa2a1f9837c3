//! Grid size resolution with optional aspect-ratio preservation.

/// Default character cell aspect ratio (height / width).
/// Terminal characters are typically ~2x taller than wide.
pub const DEFAULT_CHAR_ASPECT_RATIO: f32 = 2.0;

/// Grid used when no display area is known.
pub const DEFAULT_GRID: GridSize = GridSize { cols: 80, rows: 40 };

/// Effective grid dimensions in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

impl Default for GridSize {
    fn default() -> Self {
        DEFAULT_GRID
    }
}

impl GridSize {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Limit the grid to one cell per pixel.
    ///
    /// With `cols <= width` and `rows <= height` every cell spans at least
    /// one whole pixel, so composition never meets an empty cell. A zero
    /// dimension stays zero and is rejected by composition.
    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        Self {
            cols: self.cols.min(width),
            rows: self.rows.min(height),
        }
    }

    /// Size of the attached terminal, or [`DEFAULT_GRID`] when it cannot be
    /// queried (e.g. output is piped).
    ///
    /// One row is left free for the shell prompt.
    pub fn from_terminal() -> Self {
        match crossterm::terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 1 => Self::new(cols as u32, rows as u32 - 1),
            _ => {
                log::debug!("Terminal size unavailable, using {}x{}", DEFAULT_GRID.cols, DEFAULT_GRID.rows);
                DEFAULT_GRID
            }
        }
    }
}

/// One grid dimension as requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridAxis {
    pub value: u32,
    /// Set when the user fixed the value; auto-derived values may be
    /// adjusted to preserve the aspect ratio.
    pub fixed: bool,
}

impl GridAxis {
    /// A user-fixed value.
    pub fn fixed(value: u32) -> Self {
        Self { value, fixed: true }
    }

    /// A value left to the automatic size.
    pub fn auto() -> Self {
        Self::default()
    }

    /// `Some(n)` fixes the axis to `n`, `None` leaves it automatic.
    pub fn from_option(value: Option<u32>) -> Self {
        value.map(Self::fixed).unwrap_or_default()
    }
}

/// Requested columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridRequest {
    pub cols: GridAxis,
    pub rows: GridAxis,
}

impl GridRequest {
    pub fn new(cols: GridAxis, rows: GridAxis) -> Self {
        Self { cols, rows }
    }

    /// Both dimensions automatic.
    pub fn auto() -> Self {
        Self::default()
    }
}

/// Automatic grid size for a display area.
///
/// `area` and `cell` are `(width, height)` pairs in the same unit (pixels,
/// points...); the result is how many whole cells fit along each axis.
pub fn auto_size(area: (f32, f32), cell: (f32, f32)) -> GridSize {
    let fit = |extent: f32, cell: f32| {
        if cell > 0.0 && extent > 0.0 {
            (extent / cell).floor() as u32
        } else {
            0
        }
    };
    GridSize::new(fit(area.0, cell.0), fit(area.1, cell.1))
}

/// Resolve the effective grid size.
///
/// Fixed dimensions in `requested` are used verbatim, the rest come from
/// `auto`. With `preserve_aspect`, automatic dimensions are then adjusted so
/// that `cols / rows` matches `source_aspect` (width / height of the image in
/// character cells):
///
/// * neither fixed: the dimension that over-fills the ratio shrinks
/// * one fixed: the other is derived from it
/// * both fixed: nothing to adjust
///
/// # Example
/// ```
/// use glyph_art::ascii::{resolve, GridRequest, GridSize};
///
/// let size = resolve(GridRequest::auto(), GridSize::new(100, 100), 2.0, true);
/// assert_eq!(size, GridSize::new(100, 50));
/// ```
pub fn resolve(
    requested: GridRequest,
    auto: GridSize,
    source_aspect: f32,
    preserve_aspect: bool,
) -> GridSize {
    let mut cols = if requested.cols.fixed {
        requested.cols.value
    } else {
        auto.cols
    };
    let mut rows = if requested.rows.fixed {
        requested.rows.value
    } else {
        auto.rows
    };

    if !preserve_aspect || !(source_aspect.is_finite() && source_aspect > 0.0) {
        return GridSize { cols, rows };
    }

    let aspect = source_aspect;
    match (requested.cols.fixed, requested.rows.fixed) {
        (true, true) => {}
        (false, false) => {
            if rows as f32 * aspect > cols as f32 {
                rows = (cols as f32 / aspect).floor() as u32;
            } else if cols as f32 / aspect > rows as f32 {
                cols = (rows as f32 * aspect).floor() as u32;
            }
        }
        (false, true) => cols = (rows as f32 * aspect).floor() as u32,
        (true, false) => rows = (cols as f32 / aspect).floor() as u32,
    }

    GridSize { cols, rows }
}
