//! Console: line-buffered scrolling text output.
//!
//! This module implements the engine-output console in two layers:
//!
//! 1. **Line buffer & wrapper**: raw text is greedily wrapped to the view
//!    width and stored in a bounded FIFO of display lines. The last line
//!    stays open so continuations join up across appends.
//!
//! 2. **Viewport renderer**: given the scroll offset reported by the
//!    container, only the visible slice (plus one line of margin) is drawn.
//!
//! # Example
//!
//! ```rust
//! use chess_console::console::{ConsoleScrollView, ConsoleView};
//! use chess_console::surface::{Monospace, RecordingCanvas};
//!
//! let mut view = ConsoleView::new(Monospace::default());
//! view.set_size(560, 280);
//! view.append_text("Crafty v25.2\n");
//! view.append_text("White(1): ");
//!
//! let mut scroll = ConsoleScrollView::new(view, 280);
//! scroll.relayout();
//!
//! let mut canvas = RecordingCanvas::new();
//! scroll.render(&mut canvas);
//! assert_eq!(canvas.texts().len(), 2);
//! ```

mod line_buffer;
mod metrics;
mod scroll;
mod view;
mod wrap;

pub use line_buffer::{AppendStats, LineBuffer, MAX_LINES};
pub use metrics::{FontMetrics, DRAW_Y_OFFSET, LINE_PADDING};
pub use scroll::{ConsoleScrollView, ScrollContent, ScrollListener};
pub use view::{AppendResult, ConsoleView, Invalidation};
pub use wrap::Wrapper;
