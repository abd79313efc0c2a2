//! # chess-console
//!
//! A scrolling console for talking to a chess engine.
//!
//! Engine output is appended to a bounded, word-wrapped line buffer and
//! drawn through a viewport that only renders the visible slice. Input
//! lines go back to the engine, which runs on its own worker thread.
//!
//! ## Core Concepts
//!
//! - **Open tail line**: the last buffered line is re-wrapped together with
//!   the next chunk of output, so partial lines join up
//! - **Bounded history**: at most [`console::MAX_LINES`] lines, oldest first out
//! - **Viewport rendering**: the scroll container reports its offset; only
//!   the lines on screen (plus one) are drawn
//! - **Actor model**: engine and input run on isolated threads and talk to
//!   the UI loop over channels
//!
//! ## Example
//!
//! ```rust
//! use chess_console::console::ConsoleView;
//! use chess_console::surface::Monospace;
//!
//! let mut view = ConsoleView::new(Monospace::new(1, 1));
//! view.set_size(120, 140);
//! view.append_text("0123456789ABCDE\n");
//!
//! let lines: Vec<_> = view.lines().iter().collect();
//! assert_eq!(lines, vec!["0123456789", "ABCDE", ""]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod common;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod surface;
pub mod terminal;

// Re-exports for convenience
pub use actor::{EngineActor, InputActor, InputEvent, KeyCode, KeyModifiers};
pub use app::ConsoleApp;
pub use common::{FileInfo, FontSize};
pub use config::{ConsoleConfig, EngineConfig};
pub use console::{AppendResult, ConsoleScrollView, ConsoleView, ScrollListener};
pub use engine::{Engine, EngineEvent, MessageSink, ProcessEngine};
pub use error::{Error, Result};
pub use surface::{Canvas, Monospace, Rgb, TextMeasure};
