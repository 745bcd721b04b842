//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::Result;
use crate::error::Error;
use crate::channel::{MethodChannel, CHANNEL_NAME};
use crate::auth::ParameterGenerator;
use crate::platform::{AppIdentity, SystemBrowser};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Method channel name
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Bundle identifier reported to callers; defaults to the executable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_identifier: Option<String>,

    /// Browser application to open URLs with; defaults to the OS handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
}

fn default_channel() -> String {
    CHANNEL_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            bundle_identifier: None,
            browser: None,
        }
    }
}

impl Config {
    pub fn browser(&self) -> SystemBrowser {
        match &self.browser {
            Some(app) if !app.trim().is_empty() => SystemBrowser::with_app(app.trim()),
            _ => SystemBrowser::new(),
        }
    }

    pub fn identity(&self) -> AppIdentity {
        AppIdentity::new(self.bundle_identifier.clone())
    }

    /// Build the standard method channel from this configuration
    pub fn method_channel(&self) -> MethodChannel {
        MethodChannel::standard(
            self.channel.clone(),
            ParameterGenerator::new(),
            self.browser(),
            self.identity(),
        )
    }
}

/// Get the config directory path
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".authbridge")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Load configuration from the default location
pub fn load() -> Result<Config> {
    load_from(&config_path())
}

/// Load configuration from a file, falling back to defaults if it is missing
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!("No config at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Write a default configuration to the default location
pub fn init(force: bool) -> Result<PathBuf> {
    let path = config_path();
    init_at(&path, force)?;
    Ok(path)
}

/// Write a default configuration file, refusing to overwrite unless `force`
pub fn init_at(path: &Path, force: bool) -> Result<Config> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "Config already exists at {:?}. Use --force to overwrite.",
            path
        )));
    }

    let config = Config::default();
    save_to(&config, path)?;
    Ok(config)
}

/// Save configuration to a file
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    // Create parent directory
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::AppIdentifierProvider;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.channel, "org.sya/flutter_auth0");
        assert!(config.bundle_identifier.is_none());
        assert!(config.browser().app().is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            bundle_identifier: Some("com.example.app".to_string()),
            browser: Some("firefox".to_string()),
            ..Config::default()
        };
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.identity().bundle_identifier().unwrap(), "com.example.app");
        assert_eq!(loaded.browser().app(), Some("firefox"));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"bundle_identifier": "org.example"}"#).unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.channel, CHANNEL_NAME);
        assert_eq!(config.bundle_identifier.as_deref(), Some("org.example"));
    }

    #[test]
    fn test_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let written = init_at(&path, false).unwrap();
        assert_eq!(written, Config::default());
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"bundle_identifier": "org.example"}"#).unwrap();

        assert!(matches!(init_at(&path, false), Err(Error::Config(_))));
        assert_eq!(load_from(&path).unwrap().bundle_identifier.as_deref(), Some("org.example"));

        init_at(&path, true).unwrap();
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_from(&path), Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_method_channel_from_config() {
        let config = Config {
            channel: "custom/channel".to_string(),
            ..Config::default()
        };
        let channel = config.method_channel();
        assert_eq!(channel.name(), "custom/channel");
        assert!(channel.has("parameters"));
        assert!(channel.has("openUrl"));
        assert!(channel.has("bundleIdentifier"));
    }
}
