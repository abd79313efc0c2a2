//! Terminal frontend: hosts a [`ConsoleApp`] in a crossterm terminal.
//!
//! The console is laid out in pixels; this module maps those pixels onto
//! cells. The bottom row holds the input line, every other row belongs to
//! the console.

mod canvas;
mod grid;
mod output;

pub use canvas::{CellMetrics, GridCanvas};
pub use grid::{Cell, Grid};
pub use output::OutputBuffer;

use crate::app::ConsoleApp;
use crate::console::DRAW_Y_OFFSET;
use crate::error::Result;
use crate::surface::{Monospace, Rgb};
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Prompt shown before the input line.
const PROMPT: &str = "> ";

/// Input line colors.
const INPUT_FG: Rgb = Rgb::new(0, 255, 255);
const INPUT_BG: Rgb = Rgb::new(30, 30, 30);

/// Size `app` for a `cols x rows` terminal and return the cell metrics.
///
/// The scroll window is one top offset taller than the console rows, so
/// scrolling to the end lines the last buffered line up with the last row.
pub fn fit_app(
    app: &mut ConsoleApp<Monospace>,
    measure: &Monospace,
    cols: u16,
    rows: u16,
) -> CellMetrics {
    let cells = CellMetrics::for_font(measure, app.console().metrics(), DRAW_Y_OFFSET);
    let console_rows = rows.saturating_sub(1);
    let display_height = cells.height_px(console_rows);

    app.resize(
        cells.width_px(cols),
        display_height,
        display_height + DRAW_Y_OFFSET,
    );
    cells
}

/// Paint `app` into `grid`. Returns the cursor column on the input row.
pub fn paint(app: &mut ConsoleApp<Monospace>, cells: CellMetrics, grid: &mut Grid) -> u16 {
    let rows = grid.height();
    let console_rows = rows.saturating_sub(1);
    grid.clear();

    {
        let mut canvas = GridCanvas::new(grid, cells, 0, console_rows);
        app.render(&mut canvas);
    }

    let input_row = console_rows;
    grid.fill(0, input_row, grid.width(), 1, INPUT_FG, INPUT_BG);

    // keep the end of a long input visible
    let available = usize::from(grid.width()).saturating_sub(PROMPT.len() + 1);
    let input = app.input();
    let mut start = 0;
    while input[start..].width() > available {
        start += input[start..].chars().next().map_or(1, char::len_utf8);
    }

    let mut col = 0u16;
    for grapheme in PROMPT.graphemes(true).chain(input[start..].graphemes(true)) {
        let used = grid.set_grapheme(col, input_row, grapheme, INPUT_FG, INPUT_BG);
        if used == 0 {
            break;
        }
        col += used;
    }
    col
}

/// Switch `out` to the console screen, calling `restore` when that fails.
///
/// No [`Terminal`] exists yet at that point, so its `Drop` cannot undo
/// raw mode.
fn enter_screen<W: Write>(out: &mut W, restore: impl FnOnce()) -> io::Result<()> {
    let result = execute!(
        out,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        cursor::Hide
    );
    if result.is_err() {
        restore();
    }
    result
}

/// Owns the terminal while the console runs.
///
/// Entering switches to raw mode and the alternate screen; dropping
/// restores the previous state.
pub struct Terminal {
    stdout: Stdout,
    grid: Grid,
    output: OutputBuffer,
}

impl Terminal {
    /// Take over the terminal.
    pub fn enter() -> Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        enter_screen(&mut stdout, || {
            let _ = terminal::disable_raw_mode();
        })?;

        Ok(Self {
            stdout,
            grid: Grid::new(width, height),
            output: OutputBuffer::new(),
        })
    }

    /// Current size in (columns, rows).
    pub const fn size(&self) -> (u16, u16) {
        (self.grid.width(), self.grid.height())
    }

    /// Handle a resize event.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.grid.resize(width, height);
    }

    /// Redraw `app` in full.
    pub fn draw(&mut self, app: &mut ConsoleApp<Monospace>, cells: CellMetrics) -> Result<()> {
        let cursor_col = paint(app, cells, &mut self.grid);

        self.output.clear();
        self.output.render_grid(&self.grid);
        self.output
            .cursor_move(cursor_col, self.grid.height().saturating_sub(1));
        self.output.cursor_show();
        self.output.flush_to(&mut self.stdout)?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            cursor::Show,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FileInfo;
    use crate::config::ConsoleConfig;

    fn app(cols: u16, rows: u16) -> (ConsoleApp<Monospace>, CellMetrics) {
        let measure = Monospace::default();
        let files = FileInfo::new("/app", "/data", "/cache");
        let mut app = ConsoleApp::new(measure, &ConsoleConfig::default(), files);
        let cells = fit_app(&mut app, &measure, cols, rows);
        (app, cells)
    }

    #[test]
    fn test_wraps_to_terminal_columns() {
        let (mut app, _) = app(8, 4);
        app.on_message("abcdefghijkl");
        let lines: Vec<_> = app.console().lines().iter().collect();
        assert_eq!(lines, vec!["abcdefgh", "ijkl"]);
    }

    #[test]
    fn test_paint_shows_tail_and_input() {
        let (mut app, cells) = app(10, 4);
        for i in 0..6 {
            app.on_message(&format!("line {i}\n"));
        }
        app.push_str("e2e4");

        let mut grid = Grid::new(10, 4);
        let cursor = paint(&mut app, cells, &mut grid);

        // three console rows: the last two lines plus the open blank line
        assert_eq!(grid.row_text(0).trim_end(), "line 4");
        assert_eq!(grid.row_text(1).trim_end(), "line 5");
        assert_eq!(grid.row_text(2).trim_end(), "");
        assert_eq!(grid.row_text(3).trim_end(), "> e2e4");
        assert_eq!(cursor, 6);
    }

    #[test]
    fn test_paint_from_top() {
        let (mut app, cells) = app(10, 4);
        app.on_message("a\nb\nc\nd\ne");
        app.scroll_home();

        let mut grid = Grid::new(10, 4);
        paint(&mut app, cells, &mut grid);
        assert_eq!(grid.row_text(0).trim_end(), "a");
        assert_eq!(grid.row_text(2).trim_end(), "c");
    }

    #[test]
    fn test_long_input_keeps_end_visible() {
        let (mut app, cells) = app(8, 2);
        app.push_str("abcdefghij");
        let mut grid = Grid::new(8, 2);
        let cursor = paint(&mut app, cells, &mut grid);
        assert_eq!(grid.row_text(1).trim_end(), "> fghij");
        assert_eq!(cursor, 7);
    }

    #[test]
    fn test_control_characters_stay_off_the_wire() {
        let (mut app, cells) = app(20, 4);
        app.on_message("a\tb\r\nxyz\r\n");
        let mut grid = Grid::new(20, 4);
        paint(&mut app, cells, &mut grid);

        assert_eq!(grid.row_text(0).trim_end(), "a       b");
        assert_eq!(grid.row_text(1).trim_end(), "xyz");

        let mut output = OutputBuffer::new();
        output.render_grid(&grid);
        let bytes = output.as_bytes();
        assert!(!bytes.contains(&b'\r'));
        assert!(!bytes.contains(&b'\t'));
    }

    #[test]
    fn test_refit_after_font_change_keeps_tail() {
        let measure = Monospace::default();
        let (mut app, _) = app(40, 10);
        for i in 0..50 {
            app.on_message(&format!("line {i}\n"));
        }
        app.set_font_size(20);
        let cells = fit_app(&mut app, &measure, 40, 10);
        assert!(app.scroll_view().is_at_end());

        app.on_message("new\n");
        assert!(app.scroll_view().is_at_end());

        let mut grid = Grid::new(40, 10);
        paint(&mut app, cells, &mut grid);
        assert_eq!(grid.row_text(7).trim_end(), "new");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_enter_screen_failure_restores() {
        let mut restored = false;
        let result = enter_screen(&mut BrokenPipe, || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn test_enter_screen_success_keeps_mode() {
        let mut restored = false;
        let mut out = Vec::new();
        enter_screen(&mut out, || restored = true).unwrap();
        assert!(!restored);
        assert!(!out.is_empty());
    }
}
