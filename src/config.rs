//! Runtime configuration
//!
//! The catalog base URL and the configuration directory are passed in
//! explicitly; nothing is looked up from process-wide state.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Directory name under the platform config dir
const APP_DIR_NAME: &str = "addoncat";

/// File holding the available-updates cache
pub const AVAILABLE_UPDATES_FILE: &str = "available-updates.cfg";

/// Directory and file holding the pending-changes log
pub const CHANGES_DIR: &str = "addons_update";
pub const CHANGES_FILE: &str = "changes.cfg";

#[derive(Debug, Clone)]
pub struct Config {
    base_url: Option<Url>,
    config_dir: PathBuf,
}

impl Config {
    /// Builds a configuration from an optional base URL and a config directory.
    ///
    /// The base URL always ends with `/` afterwards so that endpoint
    /// suffixes can be appended verbatim. Without one, only the local
    /// files are usable.
    pub fn new(base_url: Option<&str>, config_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let base_url = base_url.map(normalize_base_url).transpose()?;
        let config_dir = config_dir.into();
        debug!(
            "Catalog base URL: {:?}, config dir: {}",
            base_url.as_ref().map(Url::as_str),
            config_dir.display()
        );
        Ok(Self {
            base_url,
            config_dir,
        })
    }

    /// Builds a configuration using the platform config directory
    pub fn with_default_dir(base_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::new(base_url, default_config_dir()?)
    }

    /// The catalog base URL; an error if none was configured
    pub fn base_url(&self) -> Result<&Url, ConfigError> {
        self.base_url.as_ref().ok_or(ConfigError::MissingBaseUrl)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn available_updates_path(&self) -> PathBuf {
        self.config_dir.join(AVAILABLE_UPDATES_FILE)
    }

    pub fn changes_path(&self) -> PathBuf {
        self.config_dir.join(CHANGES_DIR).join(CHANGES_FILE)
    }
}

/// Returns `<platform config dir>/addoncat`
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| ConfigError::NoConfigDir {
            message: "platform configuration directory is unknown".to_string(),
        })
}

fn normalize_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            message: "URL cannot be used as a base".to_string(),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = Config::new(Some("https://catalog.example.org/addons"), "/tmp/cfg").unwrap();
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://catalog.example.org/addons/"
        );
    }

    #[test]
    fn test_base_url_keeps_existing_slash() {
        let config = Config::new(Some("https://catalog.example.org/"), "/tmp/cfg").unwrap();
        assert_eq!(config.base_url().unwrap().as_str(), "https://catalog.example.org/");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Config::new(Some("not a url"), "/tmp/cfg");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_non_base_url_rejected() {
        let result = Config::new(Some("mailto:someone@example.org"), "/tmp/cfg");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_base_url() {
        let config = Config::new(None, "/tmp/cfg").unwrap();
        assert!(matches!(config.base_url(), Err(ConfigError::MissingBaseUrl)));
        assert_eq!(config.config_dir(), Path::new("/tmp/cfg"));
    }

    #[test]
    fn test_derived_paths() {
        let config = Config::new(Some("http://localhost/"), "/tmp/cfg").unwrap();
        assert_eq!(
            config.available_updates_path(),
            PathBuf::from("/tmp/cfg/available-updates.cfg")
        );
        assert_eq!(
            config.changes_path(),
            PathBuf::from("/tmp/cfg/addons_update/changes.cfg")
        );
    }
}
