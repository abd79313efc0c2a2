//! Line buffer: bounded FIFO of wrapped display lines.
//!
//! The last line is always "open": the next append pops it and wraps it
//! together with the new text, so a word split across two appends lands
//! on one line.

use std::collections::VecDeque;

use super::wrap::Wrapper;
use crate::surface::TextMeasure;

/// Default number of lines retained.
pub const MAX_LINES: usize = 2048;

/// Outcome of a successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendStats {
    /// Lines produced by wrapping, including the re-wrapped tail.
    pub wrapped: usize,
    /// Lines dropped from the front to get back under capacity.
    pub evicted: usize,
}

/// Ordered, capacity-bounded store of wrapped lines.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl LineBuffer {
    /// Create an empty buffer retaining at most `max_lines` lines.
    ///
    /// # Panics
    ///
    /// Panics if `max_lines` is zero.
    pub fn new(max_lines: usize) -> Self {
        assert!(max_lines > 0, "line buffer capacity must be non-zero");
        Self {
            lines: VecDeque::new(),
            max_lines,
        }
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the buffer holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Capacity.
    pub const fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Line at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Iterate over all lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Iterate from `start` to the newest line.
    pub fn iter_from(&self, start: usize) -> impl Iterator<Item = &str> {
        let start = start.min(self.lines.len());
        self.lines.range(start..).map(String::as_str)
    }

    /// Append raw text, re-wrapping the open tail line with it.
    pub fn append<M: TextMeasure + ?Sized>(
        &mut self,
        text: &str,
        wrapper: &Wrapper<'_, M>,
    ) -> AppendStats {
        let combined = match self.lines.pop_back() {
            Some(mut tail) => {
                tail.push_str(text);
                tail
            }
            None => text.to_string(),
        };

        let wrapped = wrapper.wrap(&combined);
        let produced = wrapped.len();
        self.lines.extend(wrapped);

        let evicted = self.trim_to_capacity();
        if evicted > 0 {
            log::debug!("evicted {evicted} lines (capacity {})", self.max_lines);
        }

        AppendStats {
            wrapped: produced,
            evicted,
        }
    }

    /// Drop the oldest lines until the buffer is within capacity.
    ///
    /// Returns how many lines were dropped.
    fn trim_to_capacity(&mut self) -> usize {
        let excess = self.lines.len().saturating_sub(self.max_lines);
        self.lines.drain(..excess);
        excess
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(MAX_LINES)
    }
}
