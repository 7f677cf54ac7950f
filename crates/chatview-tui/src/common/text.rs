//! Text utilities for TUI rendering.
//!
//! All widths are terminal columns as reported by `unicode-width`.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with an ellipsis if it exceeds `max_width` columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width += ch_width;
    }
    truncated.push('…');
    truncated
}

/// Removes ANSI escapes, carriage returns and tabs that would corrupt the
/// terminal grid.
///
/// Tabs expand to four spaces. Borrowed when nothing needs changing.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if s.contains(['\x1b', '\t', '\r']) {
        Cow::Owned(
            s.replace('\x1b', "")
                .replace('\r', "")
                .replace('\t', "    "),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Greedy word wrap. Words longer than `width` are split.
///
/// Always returns at least one (possibly empty) line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split(' ') {
        let word_width = word.width();
        let sep = usize::from(!current.is_empty());

        if current_width + sep + word_width <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += sep + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            let mut pieces = wrap_hard(word, width);
            if let Some(last) = pieces.pop() {
                current_width = last.width();
                current = last;
            }
            lines.extend(pieces);
        }
    }

    lines.push(current);
    lines
}

/// Splits at exactly `width` columns, keeping all whitespace.
///
/// Used for code, where indentation matters more than word boundaries.
pub fn wrap_hard(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello w…");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
    }

    #[test]
    fn test_truncate_with_ellipsis_wide_cjk() {
        // Each CJK character takes two columns.
        assert_eq!(truncate_with_ellipsis("中文test", 6), "中文t…");
    }

    #[test]
    fn test_sanitize_for_display() {
        assert_eq!(sanitize_for_display("clean text"), "clean text");
        assert!(matches!(sanitize_for_display("clean"), Cow::Borrowed(_)));
        assert_eq!(sanitize_for_display("a\tb\r"), "a    b");
        assert_eq!(sanitize_for_display("\x1b[31mred"), "[31mred");
    }

    #[test]
    fn test_wrap_words_breaks_on_spaces() {
        assert_eq!(
            wrap_words("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_words_splits_long_words() {
        assert_eq!(wrap_words("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_words_empty_is_one_line() {
        assert_eq!(wrap_words("", 10), vec![String::new()]);
    }

    #[test]
    fn test_wrap_hard_keeps_indentation() {
        assert_eq!(wrap_hard("    let x = 1;", 8), vec!["    let ", "x = 1;"]);
        assert_eq!(wrap_hard("", 8), vec![String::new()]);
    }
}
