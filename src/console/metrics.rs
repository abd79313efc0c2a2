//! Font metrics and the viewport geometry derived from them.

use crate::common::FontSize;

/// Baseline of the first line; nothing is drawn at pixel 0.
pub const DRAW_Y_OFFSET: u32 = 16;

/// Pixels added to the text size to get the line height.
pub const LINE_PADDING: u32 = 2;

/// Size-dependent layout numbers for the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    font: FontSize,
    text_size: u32,
    line_height: u32,
    lines_in_view: u32,
}

impl FontMetrics {
    /// Metrics for `size` on a display `display_height` pixels tall.
    ///
    /// Sizes outside the enumeration fall back to [`FontSize::Small`].
    pub fn new(size: i32, display_height: u32) -> Self {
        let font = match FontSize::from_value(size, FontSize::Small) {
            FontSize::Unknown => FontSize::Small,
            known => known,
        };
        let text_size = font.pixels().unwrap_or(12);
        let line_height = text_size + LINE_PADDING;

        Self {
            font,
            text_size,
            line_height,
            lines_in_view: display_height / line_height,
        }
    }

    /// Recompute for a new display height, keeping the font.
    #[must_use]
    pub fn with_display_height(self, display_height: u32) -> Self {
        Self::new(self.font.value(), display_height)
    }

    /// The selected font.
    pub const fn font(&self) -> FontSize {
        self.font
    }

    /// Text size in pixels.
    pub const fn text_size(&self) -> u32 {
        self.text_size
    }

    /// Line height in pixels.
    pub const fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Number of whole lines that fit on the display.
    pub const fn lines_in_view(&self) -> u32 {
        self.lines_in_view
    }

    /// Index of the first line to draw at scroll `offset`, for `line_count`
    /// buffered lines.
    pub const fn start_line(&self, offset: u32, line_count: usize) -> usize {
        let start = (offset / self.line_height) as usize;
        if start >= line_count {
            line_count.saturating_sub(1)
        } else {
            start
        }
    }

    /// Full scrollable extent of `line_count` lines.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn content_height(&self, line_count: usize) -> u32 {
        DRAW_Y_OFFSET + (line_count as u32).saturating_mul(self.line_height)
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new(FontSize::Small.value(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_height_per_font() {
        assert_eq!(FontMetrics::new(12, 0).line_height(), 14);
        assert_eq!(FontMetrics::new(16, 0).line_height(), 18);
        assert_eq!(FontMetrics::new(20, 0).line_height(), 22);
    }

    #[test]
    fn test_unknown_size_falls_back() {
        let metrics = FontMetrics::new(15, 140);
        assert_eq!(metrics.font(), FontSize::Small);
        assert_eq!(metrics.text_size(), 12);

        let sentinel = FontMetrics::new(-1, 140);
        assert_eq!(sentinel.font(), FontSize::Small);
        assert_eq!(sentinel.line_height(), 14);
    }

    #[test]
    fn test_lines_in_view_truncates() {
        assert_eq!(FontMetrics::new(12, 140).lines_in_view(), 10);
        assert_eq!(FontMetrics::new(12, 150).lines_in_view(), 10);
        assert_eq!(FontMetrics::new(20, 150).lines_in_view(), 6);
    }

    #[test]
    fn test_start_line_clamps() {
        let metrics = FontMetrics::new(12, 140);
        assert_eq!(metrics.start_line(0, 50), 0);
        assert_eq!(metrics.start_line(14 * 7, 50), 7);
        assert_eq!(metrics.start_line(14 * 7 + 13, 50), 7);
        assert_eq!(metrics.start_line(14 * 70, 50), 49);
        assert_eq!(metrics.start_line(500, 0), 0);
    }

    #[test]
    fn test_content_height() {
        let metrics = FontMetrics::new(16, 0);
        assert_eq!(metrics.content_height(0), DRAW_Y_OFFSET);
        assert_eq!(metrics.content_height(3), DRAW_Y_OFFSET + 54);
    }
}
