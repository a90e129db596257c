//! Configuration management for FocusGate
//!
//! Provides a strongly-typed configuration system with TOML support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Domains the user gets exempted from blocking out of the box
pub const DEFAULT_ALLOWED: &[&str] = &[
    "khanacademy.org",
    "coursera.org",
    "edx.org",
    "wikipedia.org",
    "stackoverflow.com",
    "github.com",
    "mdn.mozilla.org",
    "w3schools.com",
    "youtube.com",
    "google.com",
];

/// Platform-internal domains that must stay reachable regardless of the
/// user's allowlist (extension store, settings surfaces)
pub const RESERVED_DOMAINS: &[&str] = &["chrome.google.com", "chromewebstore.google.com"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blocking-rule settings
    pub blocking: BlockingConfig,

    /// Preference store settings
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.blocking.redirect_path.is_empty() {
            return Err(Error::config_value(
                "blocking.redirect_path",
                "must not be empty",
            ));
        }

        if self.store.poll_interval_ms == 0 {
            return Err(Error::config_value(
                "store.poll_interval_ms",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

/// Blocking-rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockingConfig {
    /// Local path the blocking rule redirects to
    pub redirect_path: String,
    /// Platform-internal domains always excluded from blocking
    pub reserved_domains: Vec<String>,
    /// Allowlist seeded on first install
    pub default_allowed: Vec<String>,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            redirect_path: "/blocked.html".to_string(),
            reserved_domains: RESERVED_DOMAINS.iter().map(ToString::to_string).collect(),
            default_allowed: DEFAULT_ALLOWED.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Preference store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Location of the JSON preference file
    pub path: PathBuf,
    /// How often the running service checks the file for outside edits
    pub poll_interval_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("prefs.json"),
            poll_interval_ms: 2000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
