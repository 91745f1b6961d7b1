//! Loading modal drawn over the whole screen while a backend call runs
//!
//! Dims the screen, draws a shadowed popup and shows either the simulated
//! generation progress or a static label.

use blogsmith_app::state::LoadingOverlay;
use blogsmith_core::sanitize_inline;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Gauge, Widget},
};

use crate::theme::{palette, styles};

const MODAL_WIDTH: u16 = 56;
const MODAL_HEIGHT: u16 = 7;

/// Shown instead of a gauge when the operation has no progress
pub const STATIC_LABEL: &str = "Fetching saved blog…";

pub struct LoadingModal<'a> {
    overlay: &'a LoadingOverlay,
}

impl<'a> LoadingModal<'a> {
    pub fn new(overlay: &'a LoadingOverlay) -> Self {
        Self { overlay }
    }
}

impl Widget for LoadingModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        dim_background(buf, area);

        let modal = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        render_shadow(buf, modal);
        Clear.render(modal, buf);

        let title = format!(" {} ", sanitize_inline(&self.overlay.title));
        let block = styles::modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        if inner.height == 0 || inner.width < 2 {
            return;
        }
        // One column of padding on each side
        let content = Rect {
            x: inner.x + 1,
            width: inner.width - 2,
            ..inner
        };

        let Some(progress) = &self.overlay.progress else {
            let line = Line::styled(STATIC_LABEL, styles::text_secondary());
            buf.set_line(content.x, content.y + content.height / 2, &line, content.width);
            return;
        };

        // Row 1: status label, row 3: gauge
        let label = Line::from(vec![
            Span::styled("◐ ", styles::accent()),
            Span::styled(progress.label(), styles::text_primary()),
        ]);
        buf.set_line(content.x, content.y + 1, &label, content.width);

        if content.height >= 4 {
            let gauge_area = Rect {
                y: content.y + 3,
                height: 1,
                ..content
            };
            Gauge::default()
                .ratio(progress.ratio().clamp(0.0, 1.0))
                .gauge_style(Style::default().fg(palette::ACCENT).bg(palette::CARD_BG))
                .label(Span::styled(
                    format!("{}%", progress.percent()),
                    Style::default().fg(palette::TEXT_BRIGHT),
                ))
                .render(gauge_area, buf);
        }
    }
}

/// Center a fixed-size rect within an area, clamped to the area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim every cell so the modal stands out
fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// 1-cell shadow along the right and bottom edges of the modal
fn render_shadow(buf: &mut Buffer, modal: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);
    let right_x = modal.x.saturating_add(modal.width);
    let bottom_y = modal.y.saturating_add(modal.height);

    for y in modal.y.saturating_add(1)..=bottom_y {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
    for x in modal.x.saturating_add(1)..=right_x {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_centered_rect_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 5);
        assert_eq!(centered_rect(56, 7, area), Rect::new(0, 0, 30, 5));
    }

    #[test]
    fn test_generation_modal_shows_label_and_percent() {
        let mut overlay = LoadingOverlay::generation("Async Rust");
        if let Some(progress) = overlay.progress.as_mut() {
            for _ in 0..10 {
                progress.tick();
            }
        }
        let expected = overlay
            .progress
            .as_ref()
            .map(|p| (p.label(), p.percent()))
            .expect("progress");

        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(LoadingModal::new(&overlay), area);

        assert!(term.buffer_contains("Writing about Async Rust"));
        assert!(term.buffer_contains(expected.0));
        assert!(term.buffer_contains(&format!("{}%", expected.1)));
    }

    #[test]
    fn test_past_blog_modal_is_static() {
        let overlay = LoadingOverlay::past_blog("post.md");
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(LoadingModal::new(&overlay), area);

        assert!(term.buffer_contains("Loading post.md"));
        assert!(term.buffer_contains(STATIC_LABEL));
        assert!(!term.buffer_contains("%"));
    }

    #[test]
    fn test_title_is_sanitized() {
        let overlay = LoadingOverlay::generation("evil\x1b]0;pwned\x07 topic");
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(LoadingModal::new(&overlay), area);

        assert!(term.buffer_contains("Writing about evil topic"));
        assert!(!term.buffer_contains("pwned"));
    }

    #[test]
    fn test_background_is_dimmed() {
        let overlay = LoadingOverlay::past_blog("a.md");
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(LoadingModal::new(&overlay), area);

        let corner = term.cell_at(0, 0).expect("cell");
        assert_eq!(corner.bg, palette::DEEPEST_BG);
    }
}
