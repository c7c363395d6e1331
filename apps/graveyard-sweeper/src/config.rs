//! Invocation configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and non-empty, or the
//! binary exits with a descriptive error before touching the directory.

use std::env;
use thiserror::Error;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the holding group ("graveyard") that receives closed
    /// accounts. Required.
    pub target_group_name: String,
    /// Base URL of the directory service API. Required.
    pub directory_base_url: String,
    /// Bearer token for the directory service, if it requires one.
    pub directory_api_token: Option<String>,
    /// Webhook URL notified on each successful move. Absent disables
    /// notification.
    pub notify_webhook_url: Option<String>,
    /// Log filter directive (`RUST_LOG`), defaulting to `info`.
    pub rust_log: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            target_group_name: require("GRAVEYARD_GROUP_NAME")?,
            directory_base_url: require("DIRECTORY_BASE_URL")?,
            directory_api_token: optional("DIRECTORY_API_TOKEN"),
            notify_webhook_url: optional("NOTIFY_WEBHOOK_URL"),
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
