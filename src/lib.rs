//! Blogsmith
//!
//! A terminal client for the blog writing agent backend. The TUI lives in
//! `blogsmith-tui`; this crate adds the headless runner used by scripts.

pub mod headless;

// Re-export main entry points
pub use blogsmith_tui::run;
pub use headless::exit_status;
pub use headless::runner::{run_headless, HeadlessRequest};
