//! Configuration system
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default per-category history capacity
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;
/// Default seconds of silence before a category goes offline
pub const DEFAULT_LIVENESS_THRESHOLD_SECS: u64 = 30;
/// Default seconds between liveness sweeps
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;
/// Default number of records returned by a history read
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub websocket: WebSocketConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telemetry store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Records retained per category before the oldest are evicted
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Seconds of silence after which a category is offline
    #[serde(default = "default_liveness_threshold")]
    pub liveness_threshold_secs: u64,

    /// Seconds between background liveness sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_liveness_threshold() -> u64 {
    DEFAULT_LIVENESS_THRESHOLD_SECS
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            liveness_threshold_secs: default_liveness_threshold(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; "*" allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// WebSocket hub configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    #[serde(default = "default_max_subscribers")]
    pub max_subscribers: usize,

    /// Events buffered per subscriber before the oldest are dropped
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_max_subscribers() -> usize {
    1000
}

fn default_event_capacity() -> usize {
    256
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            max_subscribers: default_max_subscribers(),
            event_capacity: default_event_capacity(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" for development, "json" for production
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("samudra").join("config.toml")),
            Some(PathBuf::from("/etc/samudra/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SAMUDRA_API_HOST") {
            self.api.host = host;
        }
        // PORT is what hosting platforms set; SAMUDRA_API_PORT wins if both exist
        for var in ["PORT", "SAMUDRA_API_PORT"] {
            if let Ok(port) = std::env::var(var) {
                if let Ok(p) = port.parse() {
                    self.api.port = p;
                }
            }
        }

        if let Ok(capacity) = std::env::var("SAMUDRA_HISTORY_CAPACITY") {
            if let Ok(c) = capacity.parse() {
                self.store.history_capacity = c;
            }
        }
        if let Ok(threshold) = std::env::var("SAMUDRA_LIVENESS_THRESHOLD_SECS") {
            if let Ok(t) = threshold.parse() {
                self.store.liveness_threshold_secs = t;
            }
        }
        if let Ok(interval) = std::env::var("SAMUDRA_SWEEP_INTERVAL_SECS") {
            if let Ok(i) = interval.parse() {
                self.store.sweep_interval_secs = i;
            }
        }

        if let Ok(level) = std::env::var("SAMUDRA_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SAMUDRA_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service_constants() {
        let config = Config::default();
        assert_eq!(config.store.history_capacity, 1000);
        assert_eq!(config.store.liveness_threshold_secs, 30);
        assert_eq!(config.store.sweep_interval_secs, 30);
        assert_eq!(config.api.port, 8000);
        assert_eq!(config.websocket.max_subscribers, 1000);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [store]
            liveness_threshold_secs = 60

            [api]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.store.liveness_threshold_secs, 60);
        // Unspecified fields fall back to defaults
        assert_eq!(config.store.history_capacity, 1000);
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_addr_format() {
        let api = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 8123,
            ..Default::default()
        };
        assert_eq!(api.addr(), "127.0.0.1:8123");
    }
}
