//! Error body, shown after a failed generation

use blogsmith_core::sanitize_block;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

pub const ERROR_TITLE: &str = "Generation failed";
pub const DISMISS_HINT: &str = "Esc to dismiss";

pub struct ErrorPanel<'a> {
    message: &'a str,
}

impl<'a> ErrorPanel<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for ErrorPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::styled(format!("✗ {}", ERROR_TITLE), styles::status_red()),
            Line::default(),
        ];
        lines.extend(
            sanitize_block(self.message)
                .lines()
                .map(|l| Line::styled(l.to_string(), styles::text_primary())),
        );
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Esc", styles::keybinding()),
            Span::styled(" to dismiss", styles::text_muted()),
            Span::styled(" · edit the form and press ", styles::text_muted()),
            Span::styled("Enter", styles::keybinding()),
            Span::styled(" to retry", styles::text_muted()),
        ]));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
