//! Terminal-safe rendering of backend text
//!
//! Everything the backend returns (task titles, evidence links, filenames,
//! blog markdown) is untrusted. Before it reaches a terminal cell it goes
//! through one of the functions here, so the backend can never emit escape
//! sequences that move the cursor, retitle the window or touch the clipboard.
//!
//! Markup-looking text such as `<script>` is not special in a terminal and is
//! kept verbatim: it is displayed as literal characters.

use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for terminal escape sequences.
///
/// Covers:
/// - CSI sequences: ESC [ ... final byte (colors, cursor movement, erase)
/// - OSC sequences: ESC ] ... BEL or ST (hyperlinks, titles, clipboard)
/// - DCS/APC/PM/SOS strings: ESC P|_|^|X ... ST
/// - Single-byte C1 CSI/OSC introducers (0x9B, 0x9D)
/// - Simple two-byte escapes: ESC letter
static ESCAPE_SEQUENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-?]*[\x20-/]*[@-~]              # CSI
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)?    # OSC, terminator optional when truncated
        | \x1b[P_^X][^\x1b]*(?:\x1b\\)?         # DCS / APC / PM / SOS
        | \x{9b}[0-?]*[\x20-/]*[@-~]            # 8-bit CSI
        | \x{9d}[^\x07\x{9c}]*(?:\x07|\x{9c})?  # 8-bit OSC
        | \x1b[@-Z\\-_a-z]                      # simple escapes
        ",
    )
    .expect("escape sequence regex pattern is valid")
});

const TAB_WIDTH: usize = 4;

fn is_unsafe_control(c: char) -> bool {
    c.is_control()
}

/// Sanitize text destined for a single-line cell.
///
/// Escape sequences are removed. Line breaks and tabs collapse to a single
/// space, and every other control character is dropped.
///
/// # Examples
///
/// ```
/// use blogsmith_core::sanitize_inline;
///
/// assert_eq!(sanitize_inline("\x1b[31mred\x1b[0m title"), "red title");
/// assert_eq!(sanitize_inline("line one\nline two"), "line one line two");
/// assert_eq!(sanitize_inline("<script>alert(1)</script>"), "<script>alert(1)</script>");
/// ```
pub fn sanitize_inline(input: &str) -> String {
    let stripped = ESCAPE_SEQUENCE_PATTERN.replace_all(input, "");
    let mut out = String::with_capacity(stripped.len());
    let mut last_was_space = false;

    for c in stripped.chars() {
        if matches!(c, '\n' | '\r' | '\t') {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
            continue;
        }
        if is_unsafe_control(c) {
            continue;
        }
        last_was_space = c == ' ';
        out.push(c);
    }

    out
}

/// Sanitize multi-line text (markdown bodies, code blocks).
///
/// Newlines are kept, `\r\n` becomes `\n`, tabs expand to spaces and all
/// remaining control characters and escape sequences are dropped.
pub fn sanitize_block(input: &str) -> String {
    let stripped = ESCAPE_SEQUENCE_PATTERN.replace_all(input, "");
    let mut out = String::with_capacity(stripped.len());

    for c in stripped.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str(&" ".repeat(TAB_WIDTH)),
            c if is_unsafe_control(c) => {}
            c => out.push(c),
        }
    }

    out
}

/// Check if a string contains escape sequences or control characters other
/// than newline and tab.
///
/// ```
/// use blogsmith_core::contains_control_sequences;
///
/// assert!(contains_control_sequences("\x1b]52;c;AAAA\x07"));
/// assert!(!contains_control_sequences("plain text"));
/// ```
pub fn contains_control_sequences(input: &str) -> bool {
    ESCAPE_SEQUENCE_PATTERN.is_match(input)
        || input
            .chars()
            .any(|c| is_unsafe_control(c) && !matches!(c, '\n' | '\t'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_color_codes() {
        assert_eq!(sanitize_inline("\x1b[1;32mGreen\x1b[0m"), "Green");
    }

    #[test]
    fn test_strip_cursor_movement() {
        assert_eq!(sanitize_inline("a\x1b[2Jb\x1b[10;10Hc"), "abc");
    }

    #[test]
    fn test_strip_osc_title_and_clipboard() {
        let input = "\x1b]0;pwned\x07Title\x1b]52;c;ZXZpbA==\x1b\\";
        assert_eq!(sanitize_inline(input), "Title");
    }

    #[test]
    fn test_strip_unterminated_osc() {
        assert_eq!(sanitize_inline("ok\x1b]8;;http://x"), "ok");
    }

    #[test]
    fn test_strip_c1_controls() {
        assert_eq!(sanitize_inline("a\u{9b}31mb\u{85}c"), "abc");
    }

    #[test]
    fn test_inline_collapses_newlines() {
        assert_eq!(sanitize_inline("one\r\n\ttwo"), "one two");
    }

    #[test]
    fn test_markup_is_literal() {
        let input = "<script>alert('x')</script>";
        assert_eq!(sanitize_inline(input), input);
        assert_eq!(sanitize_block(input), input);
    }

    #[test]
    fn test_unicode_preserved() {
        let input = "Café ─ 日本語 🚀";
        assert_eq!(sanitize_inline(input), input);
    }

    #[test]
    fn test_block_keeps_newlines_and_expands_tabs() {
        assert_eq!(sanitize_block("a\r\n\tb\n"), "a\n    b\n");
    }

    #[test]
    fn test_block_strips_bell_and_escapes() {
        assert_eq!(sanitize_block("x\x07y\x1b[0m\nz"), "xy\nz");
    }

    #[test]
    fn test_contains_control_sequences() {
        assert!(contains_control_sequences("\x1b[31m"));
        assert!(contains_control_sequences("bell\x07"));
        assert!(!contains_control_sequences("# Heading"));
        assert!(!contains_control_sequences(&sanitize_block("\x1b[31mred\x1b[0m\n")));
    }
}
