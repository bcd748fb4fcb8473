//! Global daymark configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DaymarkError, DaymarkResult};

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4117";

/// Seconds between remote pull checks. The engine polls rather than
/// subscribing, so this sets how stale another device's view can get.
const DEFAULT_PULL_INTERVAL_SECS: u64 = 12;

/// Request timeout for snapshot transfers.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn is_default_server_url(url: &String) -> bool {
    *url == DEFAULT_SERVER_URL
}

fn default_pull_interval() -> u64 {
    DEFAULT_PULL_INTERVAL_SECS
}

fn is_default_pull_interval(secs: &u64) -> bool {
    *secs == DEFAULT_PULL_INTERVAL_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn is_default_request_timeout(secs: &u64) -> bool {
    *secs == DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Global configuration at ~/.config/daymark/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct DaymarkConfig {
    /// Where the local database and sync state live.
    /// Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the snapshot server.
    #[serde(default = "default_server_url", skip_serializing_if = "is_default_server_url")]
    pub server_url: String,

    #[serde(default = "default_pull_interval", skip_serializing_if = "is_default_pull_interval")]
    pub pull_interval_secs: u64,

    #[serde(default = "default_request_timeout", skip_serializing_if = "is_default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for DaymarkConfig {
    fn default() -> Self {
        DaymarkConfig {
            data_dir: None,
            server_url: default_server_url(),
            pull_interval_secs: default_pull_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl DaymarkConfig {
    pub fn config_path() -> DaymarkResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaymarkError::Config("Could not determine config directory".into()))?
            .join("daymark");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to ~/.config/daymark/config.toml
    pub fn save(&self) -> DaymarkResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| DaymarkError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| DaymarkError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> DaymarkResult<()> {
        let contents = format!(
            "\
# daymark configuration

# Where your events and notes are stored:
# data_dir = \"~/.daymark\"

# Snapshot server for cross-device sync:
# server_url = \"{DEFAULT_SERVER_URL}\"

# How often to check the server for remote changes (seconds):
# pull_interval_secs = {DEFAULT_PULL_INTERVAL_SECS}

# Network timeout for sync requests (seconds):
# request_timeout_secs = {DEFAULT_REQUEST_TIMEOUT_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaymarkError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaymarkError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
