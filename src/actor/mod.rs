//! Actor Model: Message-passing between the UI thread and its workers.
//!
//! This module implements a simple actor system using crossbeam channels:
//! - **Input Actor**: Polls terminal events, forwards to the UI loop
//! - **Engine Actor**: Runs the chess engine on its own thread
//! - **UI Loop**: Owns the console; the only place it is mutated
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │   UI Loop    │
//!                                      │  (console)   │
//! ┌──────────────┐    EngineEvent      │              │
//! │Engine Thread │ ─────────────────▶  │              │
//! │              │ ◀───────────────── │              │
//! └──────────────┘   EngineCommand     └──────────────┘
//! ```

mod engine;
mod input;
mod messages;

pub use engine::EngineActor;
pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers};
