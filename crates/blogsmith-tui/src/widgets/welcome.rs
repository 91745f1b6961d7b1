//! Welcome body, shown before the first result

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

pub const WELCOME_TITLE: &str = "Write a blog post";

pub struct Welcome;

impl Welcome {
    fn lines() -> Vec<Line<'static>> {
        let step = |key: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(key, styles::keybinding()),
                Span::styled(text, styles::text_secondary()),
            ])
        };

        vec![
            Line::styled(WELCOME_TITLE, styles::accent_bold()),
            Line::default(),
            Line::styled(
                "Enter a topic and an as-of date in the sidebar.",
                styles::text_primary(),
            ),
            Line::styled(
                "The agent researches, plans and writes the post.",
                styles::text_primary(),
            ),
            Line::default(),
            step("Enter", "  generate"),
            step("Tab", "    move between panes"),
            step("1-3", "    switch result tabs"),
            step("^R", "     refresh saved blogs"),
        ]
    }
}

impl Widget for Welcome {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Vertically center when there is room
        let content_height = Self::lines().len() as u16;
        let top = area.height.saturating_sub(content_height) / 2;
        let area = Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        };

        Paragraph::new(Self::lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
