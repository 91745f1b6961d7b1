//! Evidence tab: one table row per source, in backend order

use blogsmith_core::{sanitize_inline, EvidenceItem};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table, Widget, Wrap},
};

use crate::theme::styles;

pub const EMPTY_MESSAGE: &str = "No evidence collected. This happens in closed-book mode or when no research tool is configured.";

/// Header row plus its bottom margin
const HEADER_ROWS: u16 = 2;

/// Placeholder for missing optional fields
const MISSING: &str = "-";

/// Scrollable evidence table
pub struct EvidenceTable<'a> {
    items: &'a [EvidenceItem],
    offset: usize,
}

impl<'a> EvidenceTable<'a> {
    pub fn new(items: &'a [EvidenceItem]) -> Self {
        Self { items, offset: 0 }
    }

    /// First visible row
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Rows of data that fit in a pane `height` tall
    pub fn viewport_rows(height: u16) -> u16 {
        height.saturating_sub(HEADER_ROWS)
    }

    fn row(item: &EvidenceItem) -> Row<'static> {
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(sanitize_inline)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| MISSING.to_string())
        };

        Row::new(vec![
            Cell::from(sanitize_inline(item.display_title())).style(styles::text_primary()),
            Cell::from(optional(&item.source)).style(styles::text_secondary()),
            Cell::from(optional(&item.published_at)).style(styles::text_secondary()),
            Cell::from(sanitize_inline(&item.url)).style(styles::accent()),
        ])
    }
}

impl Widget for EvidenceTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.items.is_empty() {
            Paragraph::new(Line::styled(EMPTY_MESSAGE, styles::text_muted()))
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        let header = Row::new(["Title", "Source", "Date", "Link"])
            .style(styles::text_bright_bold())
            .bottom_margin(1);
        let rows: Vec<Row> = self.items.iter().skip(self.offset).map(Self::row).collect();
        let widths = [
            Constraint::Fill(3),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Fill(2),
        ];

        Widget::render(
            Table::new(rows, widths).header(header).column_spacing(1),
            area,
            buf,
        );
    }
}
