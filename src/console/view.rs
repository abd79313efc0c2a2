//! `ConsoleView`: the scrolling engine-output console.
//!
//! The view owns the line buffer, the font metrics and the last scroll
//! offset reported by its container. It never draws on its own: appends
//! and clears raise [`Invalidation`] flags that the host drains with
//! [`ConsoleView::take_invalidation`] before measuring and rendering.

use bitflags::bitflags;

use super::line_buffer::{AppendStats, LineBuffer};
use super::metrics::{FontMetrics, DRAW_Y_OFFSET};
use super::scroll::{ScrollContent, ScrollListener};
use super::wrap::Wrapper;
use crate::config::ConsoleConfig;
use crate::surface::{Canvas, Rect, Rgb, TextMeasure, TextStyle};

bitflags! {
    /// Work the host has to do after a mutation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Invalidation: u8 {
        /// Content height changed; re-measure and re-clamp scrolling.
        const LAYOUT = 0b0000_0001;
        /// Pixels changed; draw again.
        const REDRAW = 0b0000_0010;
    }
}

/// Result of [`ConsoleView::append_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendResult {
    /// The view has no width yet; nothing was buffered. Retry once sized.
    Deferred,
    /// Text was wrapped into the buffer.
    Appended(AppendStats),
}

/// Line-buffered console text view.
pub struct ConsoleView<M> {
    lines: LineBuffer,
    metrics: FontMetrics,
    measure: M,
    /// Last vertical offset reported by the scroll container.
    scroll_y: u32,
    width: u32,
    height: u32,
    display_height: u32,
    background: Rgb,
    foreground: Rgb,
    invalidation: Invalidation,
}

impl<M: TextMeasure> ConsoleView<M> {
    /// Create a view with default configuration.
    pub fn new(measure: M) -> Self {
        Self::with_config(measure, &ConsoleConfig::default())
    }

    /// Create a view from `config`.
    ///
    /// The view starts with zero size; appends are deferred until the host
    /// calls [`ConsoleView::set_size`].
    pub fn with_config(measure: M, config: &ConsoleConfig) -> Self {
        Self {
            lines: LineBuffer::new(config.max_lines.max(1)),
            metrics: FontMetrics::new(config.text_size, config.display_height),
            measure,
            scroll_y: 0,
            width: 0,
            height: 0,
            display_height: config.display_height,
            background: config.background,
            foreground: config.foreground,
            invalidation: Invalidation::empty(),
        }
    }

    /// Set the view's laid-out size in pixels.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.invalidation |= Invalidation::REDRAW;
        }
    }

    /// Set the physical display height, which bounds lines drawn per frame.
    pub fn set_display_height(&mut self, display_height: u32) {
        self.display_height = display_height;
        self.metrics = self.metrics.with_display_height(display_height);
    }

    /// View width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// View height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Append engine output.
    ///
    /// The previous last line is re-wrapped together with `text`. Returns
    /// [`AppendResult::Deferred`] without touching any state while the view
    /// has zero width.
    pub fn append_text(&mut self, text: &str) -> AppendResult {
        if self.width == 0 {
            log::debug!("console not laid out yet, deferring {} bytes", text.len());
            return AppendResult::Deferred;
        }

        let wrapper = Wrapper::new(&self.measure, self.metrics.text_size(), self.width);
        let stats = self.lines.append(text, &wrapper);
        self.invalidation |= Invalidation::LAYOUT | Invalidation::REDRAW;

        AppendResult::Appended(stats)
    }

    /// Remove all text. Scroll offset and font are kept.
    pub fn clear_all_text(&mut self) {
        self.lines.clear();
        self.invalidation |= Invalidation::LAYOUT | Invalidation::REDRAW;
    }

    /// Select a font size; values outside the enumeration fall back to 12.
    ///
    /// Lines already buffered keep the wrapping they were given.
    pub fn set_font_size(&mut self, size: i32) {
        self.metrics = FontMetrics::new(size, self.display_height);
        self.invalidation |= Invalidation::LAYOUT | Invalidation::REDRAW;
    }

    /// Current text size in pixels.
    pub const fn font_size(&self) -> u32 {
        self.metrics.text_size()
    }

    /// Current metrics.
    pub const fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// The buffered lines.
    pub const fn lines(&self) -> &LineBuffer {
        &self.lines
    }

    /// Number of buffered lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Last scroll offset received from the container.
    pub const fn scroll_offset(&self) -> u32 {
        self.scroll_y
    }

    /// Top offset plus every line: the full scrollable extent.
    pub fn total_content_height(&self) -> u32 {
        self.metrics.content_height(self.lines.len())
    }

    /// Content remaining below the top of the viewport.
    pub fn viewable_height(&self) -> u32 {
        self.total_content_height().saturating_sub(self.scroll_y)
    }

    /// Height the view asks for during measurement: never less than a
    /// screenful of lines.
    #[allow(clippy::cast_possible_truncation)]
    pub fn measured_height(&self) -> u32 {
        let lines = (self.lines.len() as u32).max(self.metrics.lines_in_view());
        lines.saturating_mul(self.metrics.line_height())
    }

    /// First line drawn at the current scroll offset.
    pub fn start_line(&self) -> usize {
        self.metrics.start_line(self.scroll_y, self.lines.len())
    }

    /// Drain pending invalidation flags.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.invalidation)
    }

    /// Check whether a redraw is pending.
    pub const fn needs_redraw(&self) -> bool {
        self.invalidation.contains(Invalidation::REDRAW)
    }

    /// Draw the visible slice in content coordinates.
    ///
    /// Draws at most one line more than fits on the display. Returns the
    /// number of lines drawn.
    #[allow(clippy::cast_possible_wrap)]
    pub fn render(&self, canvas: &mut dyn Canvas) -> usize {
        canvas.clip_rect(Rect::from_size(self.width, self.height.max(self.measured_height())));
        canvas.fill(self.background);

        let style = TextStyle {
            color: self.foreground,
            size: self.metrics.text_size(),
        };
        let line_height = self.metrics.line_height() as i32;
        let limit = self.metrics.lines_in_view() as usize;
        let start = self.start_line();
        let mut baseline = DRAW_Y_OFFSET as i32 + start as i32 * line_height;
        let mut drawn = 0;

        for line in self.lines.iter_from(start) {
            canvas.draw_text(line, 0, baseline, style);
            baseline += line_height;

            drawn += 1;
            if drawn > limit {
                break;
            }
        }

        drawn
    }
}

impl<M> ScrollListener for ConsoleView<M> {
    fn on_view_scroll(&mut self, _x: i32, y: i32, _old_x: i32, _old_y: i32) {
        self.scroll_y = u32::try_from(y).unwrap_or(0);
    }
}

impl<M: TextMeasure> ScrollContent for ConsoleView<M> {
    fn content_height(&self) -> u32 {
        self.total_content_height()
    }

    fn render_content(&self, canvas: &mut dyn Canvas) {
        self.render(canvas);
    }
}
