//! Service configuration
//!
//! Layering, later wins: built-in defaults → TOML file → environment → CLI flags.

pub mod defaults;
pub mod types;

pub use defaults::{DEFAULT_BIND_ADDRESS, DEFAULT_PORT};
pub use types::{ConfigError, ServiceConfig};

use crate::cli::Cli;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

pub const ENV_PORT: &str = "PORT";
pub const ENV_CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
pub const ENV_DEBUG: &str = "STATUS_CHECKER_DEBUG";
pub const ENV_LOG_PATH: &str = "STATUS_CHECKER_LOG_PATH";

/// Parse a strict boolean: only "true"/"false" (case insensitive), anything else is false
pub fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true")
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origin_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

impl ServiceConfig {
    /// Resolve the effective configuration for a CLI invocation
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.apply_cli(cli);
        config.check()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PORT).filter(|v| !v.trim().is_empty()) {
            self.port = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_PORT.to_string(),
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_CORS_ALLOWED_ORIGINS) {
            self.cors_allowed_origins = parse_origin_list(&value);
        }

        if let Some(value) = lookup(ENV_DEBUG) {
            self.debug_log = parse_bool(&value);
        }

        if let Some(value) = lookup(ENV_LOG_PATH).filter(|v| !v.trim().is_empty()) {
            self.log_path = Some(PathBuf::from(value.trim()));
        }

        Ok(())
    }

    /// Overlay explicit command-line flags
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(bind) = &cli.bind {
            self.bind_address = bind.clone();
        }
        if !cli.cors_origins.is_empty() {
            self.cors_allowed_origins = cli.cors_origins.clone();
        }
        if cli.debug {
            self.debug_log = true;
        }
    }

    /// Validate the configuration
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".to_string()));
        }

        self.bind_ip()?;

        for origin in &self.cors_allowed_origins {
            if origin == "*" {
                continue;
            }
            let parsed = url::Url::parse(origin).map_err(|e| {
                ConfigError::Invalid(format!("CORS origin '{}' is not a valid URL: {}", origin, e))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                return Err(ConfigError::Invalid(format!(
                    "CORS origin '{}' must be an http(s) origin",
                    origin
                )));
            }
            if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
                return Err(ConfigError::Invalid(format!(
                    "CORS origin '{}' must not carry a path, query or fragment",
                    origin
                )));
            }
        }

        Ok(())
    }

    fn bind_ip(&self) -> Result<IpAddr, ConfigError> {
        self.bind_address.parse().map_err(|_| {
            ConfigError::Invalid(format!("bind address '{}' is not an IP address", self.bind_address))
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        Ok(SocketAddr::new(self.bind_ip()?, self.port))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.is_empty() || self.cors_allowed_origins.iter().any(|o| o == "*")
    }

    /// Debug log file, if file logging is enabled
    pub fn debug_log_path(&self) -> Option<PathBuf> {
        if !self.debug_log {
            return None;
        }
        Some(
            self.log_path
                .clone()
                .unwrap_or_else(crate::core::EnhancedDebugLogger::default_log_path),
        )
    }
}
