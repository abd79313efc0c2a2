//! Greedy line wrapping against a pixel width.

use crate::surface::TextMeasure;
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into lines no wider than `max_width` pixels.
pub struct Wrapper<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
    text_size: u32,
    max_width: u32,
}

impl<'a, M: TextMeasure + ?Sized> Wrapper<'a, M> {
    /// Wrap with `measure` at `text_size` into `max_width` pixels.
    pub const fn new(measure: &'a M, text_size: u32, max_width: u32) -> Self {
        Self {
            measure,
            text_size,
            max_width,
        }
    }

    /// Byte length of the longest prefix of `segment` that fits.
    ///
    /// Never splits a grapheme cluster. When not even the first grapheme
    /// fits, that grapheme is returned anyway so wrapping always advances.
    pub fn fit(&self, segment: &str) -> usize {
        let mut used = 0u32;
        let mut end = 0usize;

        for (offset, grapheme) in segment.grapheme_indices(true) {
            let width = self.measure.text_width(grapheme, self.text_size);
            if used.saturating_add(width) > self.max_width {
                if end == 0 {
                    return grapheme.len();
                }
                break;
            }
            used += width;
            end = offset + grapheme.len();
        }

        end
    }

    /// Wrap `text`, honoring `\n` as a hard break.
    ///
    /// A break that is the very last character yields one trailing empty
    /// line, so the next continuation starts on a fresh line.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut index = 0;

        while index < text.len() {
            let rest = &text[index..];
            let newline = rest.find('\n');
            let segment = &rest[..newline.unwrap_or(rest.len())];

            let count = self.fit(segment);
            lines.push(segment[..count].to_string());
            index += count;

            // The break is consumed only when the whole segment fit.
            if newline == Some(count) {
                index += 1;
                if index == text.len() {
                    lines.push(String::new());
                }
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Monospace;

    /// One pixel per column.
    const MONO: Monospace = Monospace::new(1, 1);

    fn wrap(text: &str, columns: u32) -> Vec<String> {
        Wrapper::new(&MONO, 1, columns).wrap(text)
    }

    #[test]
    fn test_wrap_breaks_long_segment() {
        assert_eq!(
            wrap("0123456789ABCDE\n", 10),
            vec!["0123456789", "ABCDE", ""]
        );
    }

    #[test]
    fn test_wrap_trailing_newline_adds_blank() {
        assert_eq!(wrap("line1\n", 10), vec!["line1", ""]);
    }

    #[test]
    fn test_wrap_without_terminator() {
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_wrap_consecutive_newlines() {
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap("\n", 10), vec!["", ""]);
    }

    #[test]
    fn test_wrap_exact_fit_then_newline() {
        assert_eq!(wrap("0123456789\nX", 10), vec!["0123456789", "X"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_fit_always_advances() {
        let wrapper = Wrapper::new(&MONO, 1, 1);
        assert_eq!(wrapper.fit("日本"), "日".len());
        assert_eq!(wrap("日本", 1), vec!["日", "本"]);
    }

    #[test]
    fn test_fit_keeps_grapheme_clusters() {
        let text = "e\u{301}e\u{301}";
        let wrapper = Wrapper::new(&MONO, 1, 1);
        assert_eq!(wrapper.fit(text), "e\u{301}".len());
    }

    #[test]
    fn test_segment_count_matches_newlines() {
        let text = "one\ntwo\nthree\n";
        let lines = wrap(text, 80);
        // three segments plus the blank line after the final break
        assert_eq!(lines.len(), 4);
    }
}
