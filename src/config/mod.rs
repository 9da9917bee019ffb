// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded once at
//! startup from a `settings.toml` file and treated as read-only afterwards.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and the couple's site shown on the landing view
//! - `[gateway]` - Photo service origin, API prefix and request timeout
//! - `[share]` - Public page origin and share texts
//! - `[download]` - Destination directory and fallback filename
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path
//! 2. `--config-dir` command line flag
//! 3. Platform-specific config directory (`dirs`) + `FotoboxGuest/`
//!
//! The gateway origin can additionally be overridden with the
//! `FOTOBOX_API_URL` environment variable.
//!
//! # Examples
//!
//! ```no_run
//! use fotobox_guest::config;
//!
//! let (config, _warning) = config::load(None);
//! println!("photos come from {}", config.gateway.base_url);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "FotoboxGuest";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Site advertised on the landing view.
    #[serde(default = "default_wedding_site_url")]
    pub wedding_site_url: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            wedding_site_url: default_wedding_site_url(),
        }
    }
}

/// Photo service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    /// Origin of the photo service (scheme + host, no trailing path).
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Path prefix of the JSON API.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Timeout clamped to the supported range.
    #[must_use]
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(
            self.timeout_secs
                .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS),
        )
    }
}

/// Sharing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareConfig {
    /// Public origin used to build the page link guests pass around.
    #[serde(default = "default_page_origin")]
    pub page_origin: String,

    #[serde(default = "default_share_title")]
    pub title: String,

    #[serde(default = "default_share_message")]
    pub message: String,

    #[serde(default = "default_email_subject")]
    pub email_subject: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            page_origin: default_page_origin(),
            title: default_share_title(),
            message: default_share_message(),
            email_subject: default_email_subject(),
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadConfig {
    /// Destination directory. Falls back to the platform download directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Filename used when the server did not assign one.
    #[serde(default = "default_download_filename")]
    pub fallback_filename: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: None,
            fallback_filename: default_download_filename(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub share: ShareConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    /// Applies the environment override for the gateway origin, if set and
    /// non-empty.
    pub fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()) {
            if !url.is_empty() {
                self.gateway.base_url = url;
            }
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_wedding_site_url() -> String {
    DEFAULT_WEDDING_SITE_URL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_page_origin() -> String {
    DEFAULT_PAGE_ORIGIN.to_string()
}

fn default_share_title() -> String {
    DEFAULT_SHARE_TITLE.to_string()
}

fn default_share_message() -> String {
    DEFAULT_SHARE_MESSAGE.to_string()
}

fn default_email_subject() -> String {
    DEFAULT_EMAIL_SUBJECT.to_string()
}

fn default_download_filename() -> String {
    DEFAULT_DOWNLOAD_FILENAME.to_string()
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path, honoring an explicit directory override.
fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    base_dir
        .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_NAME)))
        .map(|dir| dir.join(CONFIG_FILE))
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration and applies the environment override.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with an i18n key explaining what went wrong.
pub fn load(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let (mut config, warning) = load_file(base_dir);
    config.apply_env_override(std::env::var(ENV_API_BASE_URL).ok());
    (config, warning)
}

fn load_file(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "ignoring unreadable config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn default_config_points_at_public_service() {
        let config = Config::default();
        assert_eq!(config.gateway.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.gateway.api_prefix, "/api");
        assert_eq!(config.download.fallback_filename, "wedding-photo.jpg");
        assert!(config.general.language.is_none());
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[gateway]\nbase_url = \"http://localhost:8080\"\n\n[share]\nmessage = \"Hi!\"\n",
        )
        .expect("failed to write config");

        let loaded = load_from_path(&path).expect("config should parse");
        assert_eq!(loaded.gateway.base_url, "http://localhost:8080");
        assert_eq!(loaded.gateway.api_prefix, DEFAULT_API_PREFIX);
        assert_eq!(loaded.share.message, "Hi!");
        assert_eq!(loaded.share.title, DEFAULT_SHARE_TITLE);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn invalid_file_falls_back_to_defaults_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[gateway\n").expect("write");

        let (config, warning) = load_file(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_file_is_not_a_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_file(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn env_override_replaces_origin_only_when_non_empty() {
        let mut config = Config::default();
        config.apply_env_override(Some("   ".into()));
        assert_eq!(config.gateway.base_url, DEFAULT_API_BASE_URL);

        config.apply_env_override(Some("https://photos.example".into()));
        assert_eq!(config.gateway.base_url, "https://photos.example");

        config.apply_env_override(None);
        assert_eq!(config.gateway.base_url, "https://photos.example");
    }

    #[test]
    fn timeout_is_clamped() {
        let mut gateway = GatewayConfig::default();
        gateway.timeout_secs = 0;
        assert_eq!(gateway.timeout().as_secs(), MIN_REQUEST_TIMEOUT_SECS);
        gateway.timeout_secs = 10_000;
        assert_eq!(gateway.timeout().as_secs(), MAX_REQUEST_TIMEOUT_SECS);
    }
}
