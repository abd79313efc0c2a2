//! `GridCanvas`: draws pixel-addressed console output onto a cell grid.
//!
//! One column is one monospace advance wide and one row is one line
//! height tall. A baseline at `origin + k * row_px` lands on row `k`.

use super::grid::Grid;
use crate::console::FontMetrics;
use crate::surface::{Canvas, Monospace, Rect, Rgb, TextStyle};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Columns between tab stops.
const TAB_WIDTH: i32 = 8;

/// Pixel size of a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    /// Pixels per column.
    pub col_px: u32,
    /// Pixels per row.
    pub row_px: u32,
    /// Baseline of row 0.
    pub origin: i32,
}

impl CellMetrics {
    /// Cell size for the given font, with row 0's baseline at `origin`.
    pub fn for_font(measure: &Monospace, metrics: &FontMetrics, origin: u32) -> Self {
        Self {
            col_px: measure.advance(metrics.text_size()).max(1),
            row_px: metrics.line_height().max(1),
            origin: i32::try_from(origin).unwrap_or(0),
        }
    }

    /// Pixel width of `cols` columns.
    pub const fn width_px(&self, cols: u16) -> u32 {
        cols as u32 * self.col_px
    }

    /// Pixel height of `rows` rows.
    pub const fn height_px(&self, rows: u16) -> u32 {
        rows as u32 * self.row_px
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn column(&self, x: i32) -> i32 {
        x.div_euclid(self.col_px as i32)
    }

    /// Row whose band holds pixel `y`; row `k` spans the `row_px` pixels
    /// ending at its baseline `origin + k * row_px`.
    #[allow(clippy::cast_possible_wrap)]
    const fn row(&self, y: i32) -> i32 {
        let row_px = self.row_px as i32;
        (y - self.origin + row_px - 1).div_euclid(row_px)
    }
}

/// A [`Canvas`] over a rectangular area of a [`Grid`].
pub struct GridCanvas<'a> {
    grid: &'a mut Grid,
    metrics: CellMetrics,
    /// Area of the grid this canvas may touch, in cells.
    area: (u16, u16, u16, u16),
    /// Current clip in cells, inside `area`.
    clip: (i32, i32, i32, i32),
    bg: Rgb,
}

impl<'a> GridCanvas<'a> {
    /// Draw into the `width x height` cells starting at row `top`.
    pub fn new(grid: &'a mut Grid, metrics: CellMetrics, top: u16, height: u16) -> Self {
        let width = grid.width();
        let height = height.min(grid.height().saturating_sub(top));
        Self {
            grid,
            metrics,
            area: (0, top, width, height),
            clip: (0, 0, i32::from(width), i32::from(height)),
            bg: Rgb::BLACK,
        }
    }

    fn clip_contains(&self, col: i32, row: i32) -> bool {
        let (x0, y0, x1, y1) = self.clip;
        col >= x0 && col < x1 && row >= y0 && row < y1
    }
}

impl Canvas for GridCanvas<'_> {
    fn clip_rect(&mut self, rect: Rect) {
        let (_, _, width, height) = self.area;
        if rect.is_empty() {
            self.clip = (0, 0, 0, 0);
            return;
        }

        let x0 = self.metrics.column(rect.x).max(0);
        let y0 = self.metrics.row(rect.y).max(0);
        let x1 = (self.metrics.column(rect.right() - 1) + 1).min(i32::from(width));
        let y1 = (self.metrics.row(rect.bottom() - 1) + 1).min(i32::from(height));
        self.clip = (x0, y0, x1.max(x0), y1.max(y0));
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn fill(&mut self, color: Rgb) {
        self.bg = color;
        let (x0, y0, x1, y1) = self.clip;
        let (left, top, _, _) = self.area;
        self.grid.fill(
            left + x0 as u16,
            top + y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
            color,
            color,
        );
    }

    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, style: TextStyle) {
        let row = self.metrics.row(baseline);
        let mut col = self.metrics.column(x);

        for grapheme in text.graphemes(true) {
            if grapheme == "\t" {
                let stop = (col.div_euclid(TAB_WIDTH) + 1) * TAB_WIDTH;
                while col < stop {
                    if !self.put(col, row, " ", style.color) {
                        return;
                    }
                    col += 1;
                }
                continue;
            }
            // CR, ESC and friends would move the real cursor
            if grapheme.chars().any(char::is_control) {
                continue;
            }

            let width = i32::try_from(grapheme.width().max(1)).unwrap_or(1);
            if !self.put(col, row, grapheme, style.color) {
                break;
            }
            col += width;
        }
    }
}

impl GridCanvas<'_> {
    /// Write one grapheme at a clip-relative cell. Cells left of the clip
    /// are skipped; returns `false` once drawing should stop.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn put(&mut self, col: i32, row: i32, grapheme: &str, color: Rgb) -> bool {
        if col < 0 {
            return true;
        }
        if !self.clip_contains(col, row) {
            return false;
        }
        let (left, top, _, _) = self.area;
        let used = self.grid.set_grapheme(
            left + col as u16,
            top + row as u16,
            grapheme,
            color,
            self.bg,
        );
        used > 0
    }
}
