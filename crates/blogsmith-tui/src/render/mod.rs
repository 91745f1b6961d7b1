//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use blogsmith_app::{AppState, BodyState, FocusArea, ResultTab};
use blogsmith_core::sanitize_inline;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{
    Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
};
use ratatui::Frame;

use crate::theme::{palette, styles};
use crate::{layout, markdown, widgets, wrap};

/// Placeholder body drawn beneath the loading modal
const WORKING_MESSAGE: &str = "Working…";

/// Rendered output that outlives a single frame.
///
/// Markdown rendering runs syntax highlighting, so the preview lines are
/// kept until the result changes.
#[derive(Debug, Default)]
pub struct ViewCache {
    preview: Option<(u64, Vec<Line<'static>>)>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn preview_lines(&mut self, revision: u64, markdown: &str) -> &[Line<'static>] {
        let stale = self
            .preview
            .as_ref()
            .map_or(true, |(cached, _)| *cached != revision);
        if stale {
            self.preview = Some((revision, markdown::render_preview(markdown)));
        }
        self.preview.as_ref().map_or(&[], |(_, lines)| lines.as_slice())
    }
}

/// Render the complete UI (View function in TEA)
///
/// Only the scroll bounds of the result tabs are written back to state.
pub fn view(frame: &mut Frame, state: &mut AppState, cache: &mut ViewCache) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(
        widgets::MainHeader::new(&state.settings.api.base_url),
        areas.header,
    );
    frame.render_widget(
        widgets::TopicForm::new(&state.form, state.focus).busy(state.view.is_loading()),
        areas.form,
    );
    frame.render_widget(
        widgets::PastBlogsList::new(&state.past_blogs, state.focus == FocusArea::PastBlogs),
        areas.past_blogs,
    );

    match state.view.body() {
        BodyState::Welcome => render_panel(frame, areas.main, false, None, widgets::Welcome),
        BodyState::Loading => render_panel(
            frame,
            areas.main,
            false,
            None,
            Paragraph::new(Line::styled(WORKING_MESSAGE, styles::text_muted())),
        ),
        BodyState::Result => render_result(frame, areas.main, state, cache),
        BodyState::Error => {
            let message = state.view.error_message().unwrap_or_default();
            let block = styles::glass_block(true)
                .border_style(styles::status_red())
                .title(" Error ");
            let inner = block.inner(areas.main);
            frame.render_widget(block, areas.main);
            frame.render_widget(widgets::ErrorPanel::new(message), pad(inner));
        }
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    if let Some(overlay) = &state.overlay {
        frame.render_widget(widgets::LoadingModal::new(overlay), area);
    }
}

/// Draw a bordered panel with `content` inside
fn render_panel<W: ratatui::widgets::Widget>(
    frame: &mut Frame,
    area: Rect,
    focused: bool,
    title: Option<String>,
    content: W,
) {
    let mut block = styles::glass_block(focused);
    if let Some(title) = title {
        block = block.title(title);
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(content, pad(inner));
}

/// One column of horizontal padding
fn pad(area: Rect) -> Rect {
    if area.width < 3 {
        return area;
    }
    Rect {
        x: area.x + 1,
        width: area.width - 2,
        ..area
    }
}

fn render_result(frame: &mut Frame, area: Rect, state: &mut AppState, cache: &mut ViewCache) {
    let Some(result) = state.current_result.as_ref() else {
        return;
    };
    let focused = state.focus == FocusArea::Content;
    let tab = state.view.active_tab();

    let title = result
        .title()
        .map(|t| format!(" {} ", sanitize_inline(t)))
        .unwrap_or_else(|| " Result ".to_string());
    let block = styles::glass_block(focused).title(title);
    let inner = pad(block.inner(area));
    frame.render_widget(block, area);

    let [tabs_area, _, content_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    frame.render_widget(
        widgets::ResultTabs::new(tab)
            .counts(result.task_count(), result.evidence.len())
            .focused(focused),
        tabs_area,
    );

    // Last column is reserved for the scrollbar
    let text_width = content_area.width.saturating_sub(1);
    let lines = match tab {
        ResultTab::Plan => wrap::wrap_lines(&widgets::plan_lines(result), text_width),
        ResultTab::Preview => {
            let revision = state.result_revision();
            wrap::wrap_lines(
                cache.preview_lines(revision, &result.final_markdown),
                text_width,
            )
        }
        ResultTab::Evidence => {
            let total = to_rows(result.evidence.len());
            let viewport = widgets::EvidenceTable::viewport_rows(content_area.height);
            let scroll = state.scroll_for(tab);
            scroll.update_bounds(total, viewport);
            let offset = scroll.offset;

            if let Some(result) = state.current_result.as_ref() {
                frame.render_widget(
                    widgets::EvidenceTable::new(&result.evidence).offset(usize::from(offset)),
                    content_area,
                );
            }
            render_scrollbar(frame, content_area, total, viewport, offset);
            return;
        }
    };

    let total = to_rows(lines.len());
    let scroll = state.scroll_for(tab);
    scroll.update_bounds(total, content_area.height);
    let offset = scroll.offset;

    let visible: Vec<Line<'static>> = lines
        .into_iter()
        .skip(usize::from(offset))
        .take(usize::from(content_area.height))
        .collect();
    let text_area = Rect {
        width: text_width,
        ..content_area
    };
    frame.render_widget(Paragraph::new(visible), text_area);
    render_scrollbar(frame, content_area, total, content_area.height, offset);
}

fn to_rows(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Vertical scrollbar on the right edge, only when content overflows
fn render_scrollbar(frame: &mut Frame, area: Rect, total: u16, viewport: u16, offset: u16) {
    if total <= viewport || area.height < 2 {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"))
        .track_symbol(Some("│"))
        .thumb_symbol("█")
        .style(styles::border_inactive());

    let mut scrollbar_state = ScrollbarState::new(usize::from(total.saturating_sub(viewport)))
        .position(usize::from(offset));

    scrollbar.render(area, frame.buffer_mut(), &mut scrollbar_state);
}
