//! Block sampling and nearest-brightness symbol assignment.

use std::fmt;

use super::{ArtError, LuminanceField, Palette, Rect};

/// A `cols x rows` grid of symbols, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtGrid {
    cols: u32,
    rows: u32,
    cells: Vec<char>,
}

impl ArtGrid {
    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Symbols in row-major order.
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Iterate over the rows as slices.
    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.cols as usize)
    }

    /// Rows joined with `\n`, without a trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.cells.len() + self.rows as usize);
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.extend(line.iter());
        }
        text
    }
}

impl fmt::Display for ArtGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Compose `image` into a `cols x rows` grid of palette symbols.
///
/// The image is split into equal real-valued cells of
/// `width / cols` x `height / rows` pixels; each cell's mean brightness is
/// mapped through [`Palette::closest`].
///
/// # Errors
/// * [`ArtError::DegenerateGrid`] if `cols` or `rows` is zero
/// * [`ArtError::EmptyCell`] if a cell covers no whole pixel, which can only
///   happen when the grid is larger than the image in some dimension; see
///   [`GridSize::clamp_to`](super::GridSize::clamp_to)
pub fn compose(
    image: &LuminanceField,
    palette: &Palette,
    cols: u32,
    rows: u32,
) -> Result<ArtGrid, ArtError> {
    if cols == 0 || rows == 0 {
        return Err(ArtError::DegenerateGrid { cols, rows });
    }

    let cell_w = image.width() as f32 / cols as f32;
    let cell_h = image.height() as f32 / rows as f32;

    // Each pixel falls in exactly one cell, so more cells than pixels along
    // an axis leaves at least one of them empty
    if cols > image.width() {
        let col = first_empty_span(cols, cell_w, image.width());
        return Err(ArtError::EmptyCell { col, row: 0 });
    }
    if rows > image.height() {
        let row = first_empty_span(rows, cell_h, image.height());
        return Err(ArtError::EmptyCell { col: 0, row });
    }

    let mut cells = Vec::with_capacity(cols as usize * rows as usize);
    for row in 0..rows {
        for col in 0..cols {
            let rect = Rect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w, cell_h);
            let brightness = image
                .average(rect)
                .ok_or(ArtError::EmptyCell { col, row })?;
            cells.push(palette.closest(brightness));
        }
    }

    Ok(ArtGrid { cols, rows, cells })
}

/// Index of the first of `count` cells of size `cell` that contains no whole
/// pixel below `limit`. Only called with `count > limit`, so one exists
/// among the first `limit + 1` cells.
fn first_empty_span(count: u32, cell: f32, limit: u32) -> u32 {
    (0..count.min(limit.saturating_add(1)))
        .find(|&i| {
            let start = (i as f32 * cell).ceil();
            let end = (i as f32 * cell + cell).ceil().min(limit as f32);
            start >= end
        })
        .unwrap_or(limit)
}

/// Compose `image` and return the art as text, rows separated by `\n`.
pub fn compose_art(
    image: &LuminanceField,
    palette: &Palette,
    cols: u32,
    rows: u32,
) -> Result<String, ArtError> {
    compose(image, palette, cols, rows).map(|grid| grid.to_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_field(values: &[u8], width: u32, height: u32) -> LuminanceField {
        let data: Vec<u8> = values.iter().flat_map(|&v| [v, v, v, 255]).collect();
        LuminanceField::from_rgba(&data, width, height).unwrap()
    }

    fn ramp() -> Palette {
        Palette::from_measurements(vec![('#', 0.0), ('+', 0.5), ('.', 1.0)]).unwrap()
    }

    #[test]
    fn test_zero_grid_rejected() {
        let f = gray_field(&[0; 4], 2, 2);
        assert!(matches!(
            compose(&f, &ramp(), 0, 2),
            Err(ArtError::DegenerateGrid { cols: 0, rows: 2 })
        ));
        assert!(matches!(
            compose(&f, &ramp(), 2, 0),
            Err(ArtError::DegenerateGrid { .. })
        ));
    }

    #[test]
    fn test_one_to_one_cells() {
        let f = gray_field(&[0, 128, 255, 255, 128, 0], 3, 2);
        assert_eq!(compose_art(&f, &ramp(), 3, 2).unwrap(), "#+.\n.+#");
    }

    #[test]
    fn test_cells_average_blocks() {
        // 4x2 image, left half black, right half white, as a 2x1 grid
        let f = gray_field(&[0, 0, 255, 255, 0, 0, 255, 255], 4, 2);
        assert_eq!(compose_art(&f, &ramp(), 2, 1).unwrap(), "#.");
        // One cell spanning both halves averages to mid gray
        assert_eq!(compose_art(&f, &ramp(), 1, 1).unwrap(), "+");
    }

    #[test]
    fn test_fractional_cells_cover_every_pixel_once() {
        // 5 pixels into 2 cells: [0, 2.5) -> x 0,1,2 and [2.5, 5) -> x 3,4
        let f = gray_field(&[0, 0, 0, 255, 255], 5, 1);
        assert_eq!(compose_art(&f, &ramp(), 2, 1).unwrap(), "#.");
    }

    #[test]
    fn test_grid_larger_than_image_reports_empty_cell() {
        let f = gray_field(&[0, 255], 2, 1);
        // 3 columns over 2 pixels: the middle cell [0.67, 1.33) holds x = 1,
        // the last [1.33, 2) holds nothing
        let err = compose(&f, &ramp(), 3, 1).unwrap_err();
        assert!(matches!(err, ArtError::EmptyCell { col: 2, row: 0 }));
    }

    #[test]
    fn test_huge_grid_reports_empty_cell_without_allocating() {
        let f = gray_field(&[128], 1, 1);
        let err = compose(&f, &ramp(), u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(err, ArtError::EmptyCell { col: 1, row: 0 }));

        let err = compose(&f, &ramp(), 1, 100_000).unwrap_err();
        assert!(matches!(err, ArtError::EmptyCell { col: 0, row: 1 }));
    }

    #[test]
    fn test_no_trailing_newline() {
        let f = gray_field(&[255; 6], 3, 2);
        let text = compose_art(&f, &ramp(), 3, 2).unwrap();
        assert_eq!(text, "...\n...");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_grid_accessors() {
        let f = gray_field(&[0, 255, 255, 0], 2, 2);
        let grid = compose(&f, &ramp(), 2, 2).unwrap();
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cells(), &['#', '.', '.', '#']);
        assert_eq!(grid.lines().count(), 2);
        assert_eq!(grid.to_string(), "#.\n.#");
    }
}
