//! Bot configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server connection settings.
    pub server: ServerConfig,
    /// Channels to join after registration.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Admin allow-list settings.
    #[serde(default)]
    pub admin: AdminConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server address with port (e.g., "irc.libera.chat:6667").
    pub addr: String,
    /// Bot nickname.
    pub nick: String,
    /// Connection password (optional).
    pub password: Option<String>,
    /// Realname sent during registration.
    #[serde(default = "default_realname")]
    pub realname: String,
}

fn default_realname() -> String {
    "slircb".to_string()
}

/// Admin allow-list configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Path to the persisted admin set.
    #[serde(default = "default_state_path")]
    pub state_path: String,
    /// Seed hosts written on first start, when no persisted set exists yet.
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            hosts: Vec::new(),
        }
    }
}

fn default_state_path() -> String {
    "admins.json".to_string()
}
