//! Topic / as-of form in the sidebar

use blogsmith_app::form::{FormState, TextField};
use blogsmith_app::FocusArea;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

pub const SUBMIT_HINT: &str = "Enter to generate";
pub const BUSY_HINT: &str = "Generating…";

/// Sidebar form with the topic and as-of fields
pub struct TopicForm<'a> {
    form: &'a FormState,
    focus: FocusArea,
    busy: bool,
}

impl<'a> TopicForm<'a> {
    pub fn new(form: &'a FormState, focus: FocusArea) -> Self {
        Self {
            form,
            focus,
            busy: false,
        }
    }

    /// Show the form as locked while a request runs
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    fn label(&self, text: &'static str, field: FocusArea) -> Line<'static> {
        let style = if self.focus == field && !self.busy {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        Line::styled(text, style)
    }

    fn hint(&self) -> Line<'static> {
        if self.busy {
            Line::styled(BUSY_HINT, styles::status_yellow())
        } else {
            Line::styled(SUBMIT_HINT, styles::text_muted())
        }
    }
}

/// One input row: the visible slice of the value with a block cursor.
///
/// The window scrolls so the cursor is always visible.
fn field_line(field: &TextField, focused: bool, width: u16) -> Line<'static> {
    let chars: Vec<char> = field.value().chars().collect();
    let width = usize::from(width.max(1));
    let cursor = field.cursor().min(chars.len());
    let start = (cursor + 1).saturating_sub(width);
    let end = chars.len().min(start + width);

    let text_style = Style::default().fg(palette::TEXT_PRIMARY);
    if !focused {
        let visible: String = chars[start..end].iter().collect();
        return Line::styled(visible, text_style);
    }

    let before: String = chars[start..cursor].iter().collect();
    let at: String = chars.get(cursor).map_or(" ".to_string(), char::to_string);
    let after: String = chars.get(cursor + 1..end).unwrap_or_default().iter().collect();

    Line::from(vec![
        Span::styled(before, text_style),
        Span::styled(at, text_style.add_modifier(Modifier::REVERSED)),
        Span::styled(after, text_style),
    ])
}

impl Widget for TopicForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.focus.is_text_input() && !self.busy;
        let block = styles::glass_block(focused)
            .title(Span::styled(" New blog ", styles::accent()))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 2 {
            return;
        }

        let x = inner.x + 1;
        let width = inner.width - 1;
        let rows = [
            self.label("Topic", FocusArea::Topic),
            field_line(&self.form.topic, focused && self.focus == FocusArea::Topic, width),
            self.label("As of (YYYY-MM-DD)", FocusArea::AsOf),
            field_line(&self.form.as_of, focused && self.focus == FocusArea::AsOf, width),
            Line::default(),
            self.hint(),
        ];

        for (i, line) in rows.iter().enumerate().take(usize::from(inner.height)) {
            buf.set_line(x, inner.y + i as u16, line, width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use chrono::NaiveDate;

    fn form_with_topic(topic: &str) -> FormState {
        let mut form = FormState::new(NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"));
        for c in topic.chars() {
            form.topic.insert(c);
        }
        form
    }

    #[test]
    fn test_form_shows_fields_and_default_date() {
        let form = form_with_topic("Rust async");
        let mut term = TestTerminal::new();
        term.render_widget(TopicForm::new(&form, FocusArea::Topic), Rect::new(0, 0, 34, 8));

        assert!(term.buffer_contains("New blog"));
        assert!(term.buffer_contains("Topic"));
        assert!(term.buffer_contains("Rust async"));
        assert!(term.buffer_contains("2024-06-01"));
        assert!(term.buffer_contains(SUBMIT_HINT));
    }

    #[test]
    fn test_busy_form_shows_generating() {
        let form = form_with_topic("x");
        let mut term = TestTerminal::new();
        term.render_widget(
            TopicForm::new(&form, FocusArea::Topic).busy(true),
            Rect::new(0, 0, 34, 8),
        );

        assert!(term.buffer_contains(BUSY_HINT));
        assert!(!term.buffer_contains(SUBMIT_HINT));
    }

    #[test]
    fn test_cursor_cell_is_reversed() {
        let field = TextField::new("abc");
        let line = field_line(&field, true, 20);

        let cursor = &line.spans[1];
        assert_eq!(cursor.content, " ");
        assert!(cursor.style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_long_value_scrolls_to_cursor() {
        let field = TextField::new("abcdefghijklmnop");
        let line = field_line(&field, true, 5);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        // Cursor sits after the last char, so the tail is visible
        assert_eq!(text, "mnop ");
    }

    #[test]
    fn test_unfocused_field_has_no_cursor() {
        let field = TextField::new("abc");
        let line = field_line(&field, false, 20);

        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "abc");
    }
}
