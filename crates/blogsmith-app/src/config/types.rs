//! Configuration types for Blogsmith
//!
//! Defines `Settings` and its sections. Every field has a default, so a
//! partial (or missing) config file is always usable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use blogsmith_client::DEFAULT_API_URL;

/// Application settings (.blogsmith/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub progress: ProgressSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL of the backend (overridden by `--api-url`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Give up connecting after this many seconds (0 = no limit).
    /// Requests themselves are never timed out.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connect_timeout_secs > 0).then(|| Duration::from_secs(self.connect_timeout_secs))
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Progress animation settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProgressSettings {
    /// Interval between progress ticks in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl ProgressSettings {
    /// Tick interval, never shorter than 10ms
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

fn default_tick_ms() -> u64 {
    300
}

/// Markdown download settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Directory downloads are written to (default: working directory)
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl ExportSettings {
    pub fn resolve_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// How long status-bar notifications stay visible
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,

    /// How long the "Copied!" label stays visible
    #[serde(default = "default_copied_label_secs")]
    pub copied_label_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            notification_secs: default_notification_secs(),
            copied_label_secs: default_copied_label_secs(),
        }
    }
}

impl UiSettings {
    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    pub fn copied_label_duration(&self) -> Duration {
        Duration::from_secs(self.copied_label_secs)
    }
}

fn default_notification_secs() -> u64 {
    4
}

fn default_copied_label_secs() -> u64 {
    2
}
