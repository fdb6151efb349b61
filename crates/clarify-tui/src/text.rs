//! Width-aware text helpers
//!
//! Widths are terminal columns, not bytes: wide characters count as two and
//! combining marks as zero.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "…";

/// Rendered width of `text` in terminal columns
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut `text` to at most `max_width` columns, ending in `…` when cut
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if visible_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - visible_width(ELLIPSIS);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Greedy word wrap
///
/// Whitespace-delimited words are packed onto a line while it fits in
/// `max_width` columns. A word wider than the budget gets a line of its own.
/// Empty input yields a single empty line.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            if visible_width(word) <= max_width {
                current.push_str(word);
            } else {
                lines.push(word.to_string());
            }
            continue;
        }
        if visible_width(&current) + 1 + visible_width(word) <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            if visible_width(word) <= max_width {
                current.push_str(word);
            } else {
                lines.push(word.to_string());
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split `text` into chunks of at most `max_width` columns, breaking anywhere
///
/// A character wider than the whole line is shown as `…`.
pub fn hard_wrap(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let mut w = UnicodeWidthChar::width(ch).unwrap_or(0);
        let ch = if w > max_width {
            w = visible_width(ELLIPSIS);
            '…'
        } else {
            ch
        };
        if used + w > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(ch);
        used += w;
    }
    lines.push(current);
    lines
}
