//! Status bar widget
//!
//! Displays the body state, the focused pane, the latest notification and
//! the transient "Copied!" label.

use std::time::Instant;

use blogsmith_app::state::NotificationLevel;
use blogsmith_app::{AppState, BodyState, FocusArea};
use blogsmith_core::sanitize_inline;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

pub const COPIED_LABEL: &str = "Copied!";

/// Status bar widget showing application state
pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Get the body indicator with appropriate styling
    fn body_indicator(&self) -> Span<'static> {
        let (icon, label, style) = match self.state.view.body() {
            BodyState::Welcome => ("○", "Ready", styles::text_muted()),
            BodyState::Loading => ("◐", "Working", styles::status_yellow()),
            BodyState::Result => ("●", "Result", styles::status_green()),
            BodyState::Error => ("✗", "Error", styles::status_red()),
        };
        Span::styled(format!("{} {}", icon, label), style)
    }

    fn focus_label(&self) -> Span<'static> {
        let label = match self.state.focus {
            FocusArea::Topic => "topic",
            FocusArea::AsOf => "as of",
            FocusArea::PastBlogs => "past blogs",
            FocusArea::Content => "content",
        };
        Span::styled(format!("focus: {}", label), styles::text_secondary())
    }

    fn notification(&self) -> Option<Span<'static>> {
        let notification = self.state.notification.as_ref()?;
        if notification.is_expired(Instant::now()) {
            return None;
        }
        let style = match notification.level {
            NotificationLevel::Info => styles::text_primary(),
            NotificationLevel::Error => styles::status_red(),
        };
        Some(Span::styled(sanitize_inline(&notification.message), style))
    }

    fn separator() -> Span<'static> {
        Span::styled(" │ ", styles::border_inactive())
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::raw(" "),
            self.body_indicator(),
            Self::separator(),
            self.focus_label(),
        ];

        if let Some(note) = self.notification() {
            spans.push(Self::separator());
            spans.push(note);
        }

        if self.state.is_copied_visible() {
            spans.push(Self::separator());
            spans.push(Span::styled(COPIED_LABEL, styles::status_green()));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(palette::CARD_BG))
            .render(area, buf);
    }
}
