//! Unicode text utilities for TUI rendering.
//!
//! Widths are terminal columns as reported by `unicode-width`: CJK and other
//! wide characters count as 2, combining marks and control characters as 0.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Sanitize a string by removing non-printable characters.
///
/// Keeps printable characters and spaces; drops newlines, tabs and every
/// other control character.
pub fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

/// Display width of a single character.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a string.
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Truncate a string to fit within `max_width` display columns.
///
/// If the string fits within `max_width`, it is returned unchanged.
/// If truncated, `tail` (e.g., "...") is appended. The total display width
/// of the result (including the tail) will not exceed `max_width`.
///
/// # Examples
///
/// ```
/// use tealeaf_widgets::runeutil::truncate;
///
/// assert_eq!(truncate("hello world", 8, "..."), "hello...");
/// assert_eq!(truncate("hi", 10, "..."), "hi");
/// ```
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    let tail_width = display_width(tail);
    if tail_width >= max_width {
        return take_width(tail, max_width);
    }

    let mut result = take_width(s, max_width - tail_width);
    result.push_str(tail);
    result
}

/// The longest prefix of `s` that fits in `max_width` columns.
pub fn take_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = char_width(c);
        if width + cw > max_width {
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}
