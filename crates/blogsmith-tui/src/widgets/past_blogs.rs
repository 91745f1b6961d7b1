//! Saved blogs list in the sidebar

use blogsmith_app::state::PastBlogsState;
use blogsmith_core::{sanitize_inline, PastBlogSummary};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::theme::{palette, styles};

pub const EMPTY_MESSAGE: &str = "No saved blogs yet.";

/// Selectable list of saved blogs, newest first
pub struct PastBlogsList<'a> {
    state: &'a PastBlogsState,
    focused: bool,
}

impl<'a> PastBlogsList<'a> {
    pub fn new(state: &'a PastBlogsState, focused: bool) -> Self {
        Self { state, focused }
    }

    fn item(&self, index: usize, blog: &PastBlogSummary, width: u16) -> ListItem<'static> {
        let selected = index == self.state.selected;
        let title_style = match (selected, self.focused) {
            (true, true) => styles::focused_selected(),
            (true, false) => styles::unfocused_selected(),
            _ => styles::text_primary(),
        };

        let title = truncate(&sanitize_inline(&blog.title), usize::from(width));
        let modified = blog.modified_display();
        let mut detail = vec![Span::styled(
            sanitize_inline(&blog.filename),
            styles::text_muted(),
        )];
        if !modified.is_empty() {
            detail.push(Span::styled(format!(" · {}", modified), styles::text_muted()));
        }

        ListItem::new(vec![
            Line::styled(title, title_style),
            Line::from(detail),
        ])
    }
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

impl Widget for PastBlogsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.state.refreshing {
            " Past blogs (refreshing…) "
        } else {
            " Past blogs "
        };
        let block = styles::glass_block(self.focused)
            .title(Span::styled(title, styles::accent()))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.state.items.is_empty() {
            Paragraph::new(Line::styled(EMPTY_MESSAGE, styles::text_muted()))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, blog)| self.item(i, blog, inner.width))
            .collect();

        // ListState keeps the selected row scrolled into view
        let mut list_state = ListState::default().with_selected(Some(self.state.selected));
        StatefulWidget::render(List::new(items), inner, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use blogsmith_client::test_utils::sample_past_blog;

    fn blogs(count: usize) -> PastBlogsState {
        let mut state = PastBlogsState::default();
        state.replace(
            (1..=count)
                .map(|i| sample_past_blog(&format!("post_{}.md", i), &format!("Post {}", i)))
                .collect(),
        );
        state
    }

    #[test]
    fn test_empty_list_message() {
        let state = PastBlogsState::default();
        let mut term = TestTerminal::new();
        term.render_widget(PastBlogsList::new(&state, false), Rect::new(0, 0, 34, 10));

        assert!(term.buffer_contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_rows_show_title_and_filename() {
        let state = blogs(2);
        let mut term = TestTerminal::new();
        term.render_widget(PastBlogsList::new(&state, true), Rect::new(0, 0, 34, 10));

        assert!(term.buffer_contains("Post 1"));
        assert!(term.buffer_contains("post_1.md"));
        assert!(term.buffer_contains("Post 2"));
    }

    #[test]
    fn test_rows_keep_backend_order() {
        let state = blogs(3);
        let mut term = TestTerminal::new();
        term.render_widget(PastBlogsList::new(&state, true), Rect::new(0, 0, 34, 10));

        let content = term.content();
        let first = content.find("Post 1").expect("first row");
        let third = content.find("Post 3").expect("third row");
        assert!(first < third);
    }

    #[test]
    fn test_selected_row_is_highlighted_when_focused() {
        let state = blogs(2);
        let mut term = TestTerminal::new();
        term.render_widget(PastBlogsList::new(&state, true), Rect::new(0, 0, 34, 10));

        // First row sits right inside the border
        let cell = term.cell_at(1, 1).expect("cell");
        assert_eq!(cell.bg, palette::ACCENT);
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut state = blogs(10);
        for _ in 0..9 {
            state.select_next();
        }
        let mut term = TestTerminal::new();
        term.render_widget(PastBlogsList::new(&state, true), Rect::new(0, 0, 34, 8));

        assert!(term.buffer_contains("Post 10"));
        assert!(!term.buffer_contains("Post 1 "));
    }

    #[test]
    fn test_refreshing_title() {
        let mut state = blogs(1);
        state.refreshing = true;
        let mut term = TestTerminal::new();
        term.render_widget(PastBlogsList::new(&state, false), Rect::new(0, 0, 34, 8));

        assert!(term.buffer_contains("refreshing"));
    }

    #[test]
    fn test_titles_are_sanitized() {
        let mut state = PastBlogsState::default();
        state.replace(vec![sample_past_blog("a.md", "Bad\x1b]0;owned\x07 title")]);
        let mut term = TestTerminal::new();
        term.render_widget(PastBlogsList::new(&state, false), Rect::new(0, 0, 34, 8));

        assert!(term.buffer_contains("Bad title"));
        assert!(!term.buffer_contains("owned"));
    }

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long title", 6), "a lon…");
    }
}
