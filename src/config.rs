//! Optional YAML configuration for the `font-fetcher` binary and host hooks.
//!
//! The library core takes everything as explicit arguments; this file only
//! bundles those arguments so they can live in
//! `~/.config/font-fetcher/config.yaml` (or the platform equivalent).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetcher::FetchOptions;
use crate::hook::{HookOptions, default_renames};

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

fn default_exact() -> bool {
    true
}

fn default_http_timeout_secs() -> u64 {
    30
}

/// Fetcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Cache directory override (default: platform cache dir + `fontfetcher`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Require repository results to match the requested name exactly
    #[serde(default = "default_exact")]
    pub exact: bool,

    /// Try the next repository when an accepted download fails
    #[serde(default)]
    pub continue_on_download_error: bool,

    /// Global timeout for each HTTP request, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Font name substitutions applied by host hooks
    #[serde(default = "default_renames")]
    pub renames: BTreeMap<String, String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            exact: default_exact(),
            continue_on_download_error: false,
            http_timeout_secs: default_http_timeout_secs(),
            renames: default_renames(),
        }
    }
}

impl FetcherConfig {
    /// Directory holding `config.yaml`.
    pub fn config_dir() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("font-fetcher")
        } else {
            PathBuf::from(".")
        }
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml_ng::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            continue_on_download_error: self.continue_on_download_error,
        }
    }

    pub fn hook_options(&self) -> HookOptions {
        HookOptions {
            renames: self.renames.clone(),
            exact_match: self.exact,
        }
    }
}
