//! Configuration file support for the annotext client
//!
//! Loads config from ~/.annotext/config.toml

use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the annotext client
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the annotext backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether add-tags deduplicates against a record's existing tags.
    /// The backend's $addToSet already deduplicates server-side; this
    /// controls whether the local cache mirrors that.
    #[serde(default)]
    pub dedup_added_tags: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            dedup_added_tags: false,
        }
    }
}

impl Config {
    /// Load config from ~/.annotext/config.toml, falling back to defaults
    /// when the file is missing or unreadable. `ANNOTEXT_BASE_URL` in the
    /// environment overrides the file.
    pub fn load() -> Self {
        let path = config_path();

        let mut config = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("ANNOTEXT_BASE_URL") {
            config.base_url = url;
        }

        config
    }

    /// Config with an explicit base URL, defaults for everything else
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".annotext")
        .join("config.toml")
}
