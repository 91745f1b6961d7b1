//! Header bar widget
//!
//! App title, backend URL and the global keybindings.

use blogsmith_core::sanitize_inline;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

const TITLE: &str = "✎ Blogsmith";

/// Global keys; dropped when the header is too narrow
const KEY_HINTS: [(&str, &str); 4] = [
    ("Tab", "focus"),
    ("^S", "save"),
    ("^Y", "copy"),
    ("^C", "quit"),
];

/// Main header showing app title, backend URL, and keybindings
pub struct MainHeader<'a> {
    api_url: &'a str,
}

impl<'a> MainHeader<'a> {
    pub fn new(api_url: &'a str) -> Self {
        Self { api_url }
    }

    fn title_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(TITLE, styles::accent_bold()),
            Span::raw("  "),
            Span::styled(sanitize_inline(self.api_url), styles::text_muted()),
        ])
    }

    fn hints_line() -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (key, action)) in KEY_HINTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}", action), styles::text_secondary()));
        }
        Line::from(spans)
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = self.title_line();
        let hints = Self::hints_line();
        let title_width = title.width() as u16;
        let hints_width = hints.width() as u16;

        buf.set_line(inner.x + 1, inner.y, &title, inner.width.saturating_sub(1));

        // Right-align hints only when they fit beside the title
        if title_width + hints_width + 4 <= inner.width {
            let x = inner.x + inner.width - hints_width - 1;
            buf.set_line(x, inner.y, &hints, hints_width);
        }
    }
}
