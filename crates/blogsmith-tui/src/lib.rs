//! blogsmith-tui - Terminal UI for Blogsmith
//!
//! This crate provides the ratatui-based terminal interface. It drives an
//! Engine from blogsmith-app and adds terminal rendering, event polling and
//! the plan, evidence, preview and past-blog panes.

pub mod event;
pub mod layout;
pub mod markdown;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;
pub mod wrap;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::run;
