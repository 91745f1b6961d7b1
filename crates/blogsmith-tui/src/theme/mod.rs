//! Centralized theme for the Blogsmith TUI.
//!
//! - `palette`: raw color constants
//! - `styles`: semantic style builders and block helpers

pub mod palette;
pub mod styles;
