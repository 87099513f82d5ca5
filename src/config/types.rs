use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Effective service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// Listen port
    pub port: u16,
    /// CORS allow-list; empty or `*` allows every origin
    pub cors_allowed_origins: Vec<String>,
    /// Mirror every log entry (including DEBUG) into a rotating file
    pub debug_log: bool,
    /// Override for the debug log file location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config read error: {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
