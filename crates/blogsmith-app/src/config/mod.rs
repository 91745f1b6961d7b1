//! Configuration file parsing for Blogsmith
//!
//! Supports:
//! - `.blogsmith/config.toml` - Global settings (or an explicit `--config` path)

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, load_settings_from, CONFIG_DIR, CONFIG_FILENAME};
pub use types::*;
