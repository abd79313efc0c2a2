//! Surface: the drawing and measuring capabilities a host provides.
//!
//! The console never talks to a concrete toolkit. Everything it needs from
//! the host is expressed by two traits:
//!
//! - [`TextMeasure`]: how wide a string renders at a given text size
//! - [`Canvas`]: clip, fill and draw text at a baseline
//!
//! Coordinates are in pixels. The terminal frontend maps pixels onto cells;
//! tests use [`RecordingCanvas`] to observe draw calls directly.

mod canvas;
mod color;
mod rect;

pub use canvas::{Canvas, DrawCall, RecordingCanvas, TextStyle, Translated};
pub use color::Rgb;
pub use rect::Rect;

use unicode_width::UnicodeWidthStr;

/// Measures rendered text width.
pub trait TextMeasure {
    /// Width in pixels of `text` drawn at `text_size`.
    fn text_width(&self, text: &str, text_size: u32) -> u32;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_width(&self, text: &str, text_size: u32) -> u32 {
        (**self).text_width(text, text_size)
    }
}

/// A monospace font: every column advances by the same number of pixels.
///
/// The advance is `text_size * numerator / denominator`; wide (CJK)
/// graphemes take two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monospace {
    numerator: u32,
    denominator: u32,
}

impl Monospace {
    /// Create a monospace measure with the given advance ratio.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        assert!(denominator > 0, "advance denominator must be non-zero");
        Self { numerator, denominator }
    }

    /// Pixel advance of one column at `text_size`.
    #[inline]
    pub const fn advance(&self, text_size: u32) -> u32 {
        text_size * self.numerator / self.denominator
    }
}

impl Default for Monospace {
    /// 0.6em, the usual advance of monospace faces.
    fn default() -> Self {
        Self::new(3, 5)
    }
}

impl TextMeasure for Monospace {
    #[allow(clippy::cast_possible_truncation)]
    fn text_width(&self, text: &str, text_size: u32) -> u32 {
        UnicodeWidthStr::width(text) as u32 * self.advance(text_size)
    }
}
