//! Canvas: the drawing half of the host surface.

use super::{Rect, Rgb};

/// Paint used for a text draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Text color.
    pub color: Rgb,
    /// Text size in pixels.
    pub size: u32,
}

/// A 2D drawing surface.
pub trait Canvas {
    /// Replace the current clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Fill the current clip with `color`.
    fn fill(&mut self, color: Rgb);

    /// Draw `text` starting at `x` with its baseline at `baseline`.
    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, style: TextStyle);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn clip_rect(&mut self, rect: Rect) {
        (**self).clip_rect(rect);
    }

    fn fill(&mut self, color: Rgb) {
        (**self).fill(color);
    }

    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, style: TextStyle) {
        (**self).draw_text(text, x, baseline, style);
    }
}

/// A canvas whose origin is shifted by `(dx, dy)`.
///
/// Scroll containers draw their content through this so that content
/// coordinates map onto the visible window.
pub struct Translated<C> {
    inner: C,
    dx: i32,
    dy: i32,
}

impl<C: Canvas> Translated<C> {
    /// Wrap `inner`, adding `(dx, dy)` to every coordinate.
    pub const fn new(inner: C, dx: i32, dy: i32) -> Self {
        Self { inner, dx, dy }
    }
}

impl<C: Canvas> Canvas for Translated<C> {
    fn clip_rect(&mut self, rect: Rect) {
        self.inner.clip_rect(rect.offset(self.dx, self.dy));
    }

    fn fill(&mut self, color: Rgb) {
        self.inner.fill(color);
    }

    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, style: TextStyle) {
        self.inner
            .draw_text(text, x + self.dx, baseline + self.dy, style);
    }
}

/// One recorded canvas operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    /// `clip_rect`
    Clip(Rect),
    /// `fill`
    Fill(Rgb),
    /// `draw_text`
    Text {
        /// Text drawn.
        text: String,
        /// Left edge.
        x: i32,
        /// Baseline.
        baseline: i32,
        /// Paint.
        style: TextStyle,
    },
}

/// A canvas that records every call, for inspection.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Text draws only, as `(text, baseline)`.
    pub fn texts(&self) -> Vec<(&str, i32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, baseline, .. } => Some((text.as_str(), *baseline)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clip_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Clip(rect));
    }

    fn fill(&mut self, color: Rgb) {
        self.calls.push(DrawCall::Fill(color));
    }

    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, style: TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            baseline,
            style,
        });
    }
}
