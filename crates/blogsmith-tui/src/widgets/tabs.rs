//! Result tab bar (Plan / Evidence / Preview)

use blogsmith_app::ResultTab;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

use crate::theme::styles;

/// Tab bar above the result pane
pub struct ResultTabs {
    active: ResultTab,
    evidence_count: usize,
    task_count: usize,
    focused: bool,
}

impl ResultTabs {
    pub fn new(active: ResultTab) -> Self {
        Self {
            active,
            evidence_count: 0,
            task_count: 0,
            focused: false,
        }
    }

    /// Show item counts next to the tab names
    pub fn counts(mut self, task_count: usize, evidence_count: usize) -> Self {
        self.task_count = task_count;
        self.evidence_count = evidence_count;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn titles(&self) -> Vec<Line<'static>> {
        ResultTab::ALL
            .iter()
            .map(|tab| {
                let count = match tab {
                    ResultTab::Plan if self.task_count > 0 => format!(" ({})", self.task_count),
                    ResultTab::Evidence => format!(" ({})", self.evidence_count),
                    _ => String::new(),
                };
                Line::from(vec![
                    Span::styled(format!("{} ", tab.index() + 1), styles::keybinding()),
                    Span::raw(format!("{}{}", tab.title(), count)),
                ])
            })
            .collect()
    }
}

impl Widget for ResultTabs {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let highlight = if self.focused {
            styles::focused_selected()
        } else {
            styles::unfocused_selected()
        };

        Tabs::new(self.titles())
            .select(self.active.index())
            .style(styles::text_secondary())
            .highlight_style(highlight)
            .divider("│")
            .render(area, buf);
    }
}
