//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use super::grid::Grid;
use crate::surface::Rgb;
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let _ = write!(self.data, "\x1b[{};{}H", y + 1, x + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Set background color (true color).
    #[inline]
    pub fn set_bg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Append a full redraw of `grid`, emitting colors only when they change.
    pub fn render_grid(&mut self, grid: &Grid) {
        self.cursor_hide();

        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;

        for y in 0..grid.height() {
            self.cursor_move(0, y);

            for x in 0..grid.width() {
                let Some(cell) = grid.get(x, y) else {
                    continue;
                };
                // Skip continuation cells
                let Some(symbol) = cell.symbol() else {
                    continue;
                };

                if last_fg != Some(cell.fg()) {
                    self.set_fg(cell.fg());
                    last_fg = Some(cell.fg());
                }
                if last_bg != Some(cell.bg()) {
                    self.set_bg(cell.bg());
                    last_bg = Some(cell.bg());
                }
                self.data.extend_from_slice(symbol.as_bytes());
            }
        }

        self.reset_attrs();
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_grid_emits_text_once_per_color() {
        let mut grid = Grid::new(3, 1);
        grid.set_grapheme(0, 0, "N", Rgb::WHITE, Rgb::BLACK);
        grid.set_grapheme(1, 0, "f", Rgb::WHITE, Rgb::BLACK);

        let mut out = OutputBuffer::new();
        out.render_grid(&grid);
        let text = String::from_utf8_lossy(out.as_bytes()).into_owned();

        assert!(text.starts_with("\x1b[?25l\x1b[1;1H"));
        assert!(text.contains("Nf "));
        assert_eq!(text.matches("\x1b[38;2;").count(), 1);
        assert!(text.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_flush_to_writer() {
        let mut out = OutputBuffer::with_capacity(8);
        out.cursor_move(4, 2);
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"\x1b[3;5H");

        out.clear();
        assert!(out.as_bytes().is_empty());
    }
}
