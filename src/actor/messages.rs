//! Message types for terminal input.
//!
//! Engine traffic uses [`crate::engine::EngineCommand`] and
//! [`crate::engine::EngineEvent`].

/// Key codes for keyboard input.
///
/// This is the subset of crossterm's `KeyCode` the console reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, typed into the input line.
    Char(char),
    /// Function key; F1-F3 select the console font size.
    F(u8),
    /// Deletes the last input character.
    Backspace,
    /// Sends the input line to the engine.
    Enter,
    /// Scrolls back one line.
    Up,
    /// Scrolls forward one line.
    Down,
    /// Jumps to the oldest output.
    Home,
    /// Jumps to the newest output.
    End,
    /// Scrolls back one screen.
    PageUp,
    /// Scrolls forward one screen.
    PageDown,
    /// Quits the console.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// Only Control.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Mouse wheel; positive is up.
    MouseScroll {
        /// Scroll delta in lines.
        delta: i16,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Paste event (bracketed paste).
    Paste(String),

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}
