//! Configuration management for Taskdeck auth clients.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default auth API base URL (can be overridden at compile time via TASKDECK_API_URL env var).
pub const DEFAULT_API_URL: &str = match option_env!("TASKDECK_API_URL") {
    Some(url) => url,
    None => "https://api.taskdeck.app",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default HTTP transport timeout for auth service calls.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the log level at runtime.
const LOG_LEVEL_ENV: &str = "TASKDECK_LOG_LEVEL";

/// Environment variable overriding the API URL at runtime.
const API_URL_ENV: &str = "TASKDECK_API_URL";

/// Behavior switches for the session state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Remove persisted `token`/`user` entries when the stored user fails to parse.
    /// Off by default: malformed data is ignored and left in place.
    #[serde(default)]
    pub purge_malformed_session: bool,
    /// Drop fulfilled/rejected results of operations superseded by a later dispatch.
    /// Off by default: the last operation to complete wins.
    #[serde(default)]
    pub ignore_stale_completions: bool,
}

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Auth service base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Transport timeout applied by the HTTP client, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Session state machine settings.
    #[serde(default)]
    pub session: SessionSettings,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api_url: default_api_url(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            session: SessionSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from the config file, falling back to defaults,
    /// then apply environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    fn load_from_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup (the process environment in production).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
    }

    /// Get the API URL as a parsed URL.
    pub fn api_url(&self) -> CoreResult<Url> {
        Url::parse(&self.api_url).map_err(CoreError::from)
    }

    /// Transport timeout for the HTTP auth client.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
