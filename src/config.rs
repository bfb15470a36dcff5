//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Base address of the event store
    pub gateway_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Acting user; no submissions happen without one
    pub user_id: Option<String>,
    /// Bearer token for the event store
    pub access_token: Option<String>,
    /// Start a fresh form after an accepted submission
    pub clear_on_success: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_id: None,
            access_token: None,
            clear_on_success: false,
        }
    }
}

impl TuiConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "domestico", "esocial-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Override settings from `ESOCIAL_*` variables
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ESOCIAL_GATEWAY_URL").filter(|v| !v.trim().is_empty()) {
            self.gateway_url = url;
        }
        if let Some(user) = var("ESOCIAL_USER_ID") {
            self.user_id = Some(user);
        }
        if let Some(token) = var("ESOCIAL_TOKEN") {
            self.access_token = Some(token);
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}
