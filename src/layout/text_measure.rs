//! Text Measurement
//!
//! Utilities for measuring text dimensions in terminal cells.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters and most emoji: 2 cells
//! - Zero-width characters: 0 cells

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}

/// Display width of a single character (control characters are 0).
#[inline]
pub fn char_width(c: char) -> u16 {
    UnicodeWidthChar::width(c).unwrap_or(0) as u16
}

/// Measure the height of text when word-wrapped to a given width.
///
/// Returns the number of lines (minimum 1 for non-empty text, 0 for empty).
pub fn measure_text_height(text: &str, available_width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    wrap_text(text, available_width).len().min(u16::MAX as usize) as u16
}

/// Word-wrap text to a given width.
///
/// Words longer than the width are broken mid-word. Explicit newlines are
/// preserved. A width of 0 is treated as 1.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0u16;

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let word_width = string_width(word);

            if line_width > 0 && line_width + 1 + word_width <= width {
                line.push(' ');
                line.push_str(word);
                line_width += 1 + word_width;
                continue;
            }

            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            // Hard-break an over-long word
            for c in word.chars() {
                let w = char_width(c);
                if line_width + w > width && line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += w;
            }
        }

        lines.push(line);
    }

    lines
}

/// Truncate text to fit within a width, appending an ellipsis when cut.
pub fn truncate_text(text: &str, width: u16) -> String {
    if string_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0u16;
    for c in text.chars() {
        let w = char_width(c);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("日本"), 4);
    }

    #[test]
    fn test_wrap_words() {
        let lines = wrap_text("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_long_word() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_newlines() {
        let lines = wrap_text("a\nb", 10);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_measure_height() {
        assert_eq!(measure_text_height("", 10), 0);
        assert_eq!(measure_text_height("one two three", 7), 2);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer line", 6), "a lon…");
    }
}
