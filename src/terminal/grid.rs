//! Grid: a row-major matrix of terminal cells.

use crate::surface::Rgb;
use unicode_width::UnicodeWidthStr;

/// A single terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Grapheme shown in the cell; empty for the right half of a wide char.
    symbol: String,
    fg: Rgb,
    bg: Rgb,
}

impl Cell {
    /// A blank cell painted with `bg`.
    pub fn blank(fg: Rgb, bg: Rgb) -> Self {
        Self {
            symbol: " ".to_string(),
            fg,
            bg,
        }
    }

    /// The grapheme, or `None` for a wide-character continuation.
    pub fn symbol(&self) -> Option<&str> {
        (!self.symbol.is_empty()).then_some(self.symbol.as_str())
    }

    /// Foreground color.
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    pub const fn bg(&self) -> Rgb {
        self.bg
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Rgb::WHITE, Rgb::BLACK)
    }
}

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a grid of blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::default(); size],
            width,
            height,
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) coordinates to a linear index.
    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Get the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Write `grapheme` at (x, y).
    ///
    /// Wide graphemes also claim (x+1, y). Returns the columns used, or 0
    /// when out of bounds or when a wide grapheme would be cut at the edge.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_grapheme(&mut self, x: u16, y: u16, grapheme: &str, fg: Rgb, bg: Rgb) -> u16 {
        let width = UnicodeWidthStr::width(grapheme).max(1) as u16;
        let Some(idx) = self.index_of(x, y) else {
            return 0;
        };
        if width == 2 && x + 1 >= self.width {
            return 0;
        }

        self.cells[idx] = Cell {
            symbol: grapheme.to_string(),
            fg,
            bg,
        };
        if width == 2 {
            self.cells[idx + 1] = Cell {
                symbol: String::new(),
                fg,
                bg,
            };
        }

        width
    }

    /// Paint a rectangle of cells blank with `bg`.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, height: u16, fg: Rgb, bg: Rgb) {
        for row in y..y.saturating_add(height).min(self.height) {
            for col in x..x.saturating_add(width).min(self.width) {
                if let Some(idx) = self.index_of(col, row) {
                    self.cells[idx] = Cell::blank(fg, bg);
                }
            }
        }
    }

    /// Blank the whole grid.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize, discarding content.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    /// Text of row `y`, skipping wide continuations.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).and_then(Cell::symbol))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = Grid::new(10, 5);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.row_text(0), " ".repeat(10));
    }

    #[test]
    fn test_grid_set_grapheme() {
        let mut grid = Grid::new(4, 1);
        assert_eq!(grid.set_grapheme(0, 0, "K", Rgb::WHITE, Rgb::BLACK), 1);
        assert_eq!(grid.set_grapheme(1, 0, "王", Rgb::WHITE, Rgb::BLACK), 2);
        assert_eq!(grid.row_text(0), "K王 ");
        assert_eq!(grid.get(2, 0).unwrap().symbol(), None);
    }

    #[test]
    fn test_grid_wide_at_edge_rejected() {
        let mut grid = Grid::new(2, 1);
        assert_eq!(grid.set_grapheme(1, 0, "王", Rgb::WHITE, Rgb::BLACK), 0);
        assert_eq!(grid.set_grapheme(5, 0, "x", Rgb::WHITE, Rgb::BLACK), 0);
    }

    #[test]
    fn test_grid_fill_clamps() {
        let mut grid = Grid::new(3, 2);
        let red = Rgb::new(255, 0, 0);
        grid.fill(1, 1, 10, 10, Rgb::WHITE, red);
        assert_eq!(grid.get(2, 1).unwrap().bg(), red);
        assert_eq!(grid.get(0, 1).unwrap().bg(), Rgb::BLACK);
    }
}
