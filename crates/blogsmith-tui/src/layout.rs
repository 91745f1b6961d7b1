//! Screen layout definitions for the TUI
//!
//! ```text
//! ┌ header ─────────────────────────────────────┐
//! ├ form ──────┬ main ──────────────────────────┤
//! │            │                                │
//! ├ past blogs ┤                                │
//! │            │                                │
//! └────────────┴────────────────────────────────┘
//!  status bar
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

/// Header height: top border + title row + bottom border
const HEADER_HEIGHT: u16 = 3;

/// Form height: borders + topic and date rows with labels + hint row
pub const FORM_HEIGHT: u16 = 8;

/// Preferred sidebar width; never more than half the screen
pub const SIDEBAR_WIDTH: u16 = 34;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// App title, backend URL and key hints
    pub header: Rect,

    /// Topic / as-of form
    pub form: Rect,

    /// Saved blogs list
    pub past_blogs: Rect,

    /// Welcome, result, or error body
    pub main: Rect,

    /// One-row status bar
    pub status: Rect,
}

/// Split the terminal into the main screen areas
pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let sidebar_width = SIDEBAR_WIDTH.min(rows[1].width / 2);
    let columns =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(1)]).split(rows[1]);

    let sidebar = Layout::vertical([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)])
        .split(columns[0]);

    ScreenAreas {
        header: rows[0],
        form: sidebar[0],
        past_blogs: sidebar[1],
        main: columns[1],
        status: rows[2],
    }
}
