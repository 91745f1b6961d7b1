//! Settings loading from `.blogsmith/config.toml`

use std::path::{Path, PathBuf};

use blogsmith_core::prelude::*;

use super::types::Settings;

pub const CONFIG_DIR: &str = ".blogsmith";
pub const CONFIG_FILENAME: &str = "config.toml";

/// `<base>/.blogsmith/config.toml`
pub fn default_config_path(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILENAME)
}

/// Load settings from `<base>/.blogsmith/config.toml`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(base: &Path) -> Settings {
    load_settings_from(&default_config_path(base))
}

/// Load settings from an explicit file
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings_from(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();

        let config = r#"
[api]
base_url = "http://127.0.0.1:8123/"
connect_timeout_secs = 3

[progress]
tick_ms = 100

[export]
directory = "exports"

[ui]
notification_secs = 6
"#;
        std::fs::write(dir.join(CONFIG_FILENAME), config).unwrap();

        let settings = load_settings(temp.path());

        assert_eq!(settings.api.base_url, "http://127.0.0.1:8123/");
        assert_eq!(settings.api.connect_timeout_secs, 3);
        assert_eq!(settings.progress.tick_ms, 100);
        assert_eq!(settings.export.directory, Some(PathBuf::from("exports")));
        assert_eq!(settings.ui.notification_secs, 6);
        assert_eq!(settings.ui.copied_label_secs, 2);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILENAME), "not valid toml {{{{").unwrap();

        let settings = load_settings(temp.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_from_explicit_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "[progress]\ntick_ms = 50\n").unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.progress.tick_ms, 50);
    }
}
