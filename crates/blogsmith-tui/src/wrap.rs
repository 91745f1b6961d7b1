//! Word wrapping for styled lines
//!
//! Result panes scroll by row, so they must know exactly how many rows a
//! block of text occupies. Wrapping here instead of inside `Paragraph` keeps
//! the row count and the drawn rows in agreement.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap every line to `width` columns, breaking at whitespace where possible
pub fn wrap_lines(lines: &[Line<'static>], width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    if line.width() <= width {
        return vec![line.clone()];
    }

    let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    let mut row_width = 0usize;

    for span in &line.spans {
        for token in split_tokens(&span.content) {
            let token_width = token.width();
            let is_space = token.chars().all(char::is_whitespace);

            // Continuation rows never start with whitespace
            if is_space && row_width == 0 && rows.len() > 1 {
                continue;
            }

            if row_width + token_width <= width {
                push_text(&mut rows, token, span.style);
                row_width += token_width;
            } else if is_space {
                rows.push(Vec::new());
                row_width = 0;
            } else if token_width <= width {
                if row_width > 0 {
                    rows.push(Vec::new());
                }
                push_text(&mut rows, token, span.style);
                row_width = token_width;
            } else {
                // Longer than a whole row: split by character
                for c in token.chars() {
                    let char_width = c.width().unwrap_or(0);
                    if row_width + char_width > width && row_width > 0 {
                        rows.push(Vec::new());
                        row_width = 0;
                    }
                    let mut buf = [0u8; 4];
                    push_text(&mut rows, c.encode_utf8(&mut buf), span.style);
                    row_width += char_width;
                }
            }
        }
    }

    rows.into_iter()
        .map(|mut spans| {
            trim_row_end(&mut spans);
            spans
        })
        .map(|spans| Line {
            spans,
            style: line.style,
            alignment: line.alignment,
        })
        .collect()
}

/// Append to the last row, merging with the previous span when styles match
fn push_text(rows: &mut [Vec<Span<'static>>], text: &str, style: Style) {
    let Some(row) = rows.last_mut() else {
        return;
    };
    match row.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push_str(text),
        _ => row.push(Span::styled(text.to_string(), style)),
    }
}

/// Drop whitespace left at the end of a row by a break
fn trim_row_end(spans: &mut Vec<Span<'static>>) {
    while let Some(last) = spans.last_mut() {
        let trimmed_len = last.content.trim_end().len();
        if trimmed_len == 0 {
            spans.pop();
        } else {
            last.content.to_mut().truncate(trimmed_len);
            break;
        }
    }
}

/// Split into alternating runs of whitespace and non-whitespace
fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            tokens.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
