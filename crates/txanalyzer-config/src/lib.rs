//! Configuration management for txanalyzer
//!
//! This module handles loading, validation, and management of
//! txanalyzer configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration (where the form page is served)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// External analysis service location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Analysis service host
    #[serde(default = "default_analysis_host")]
    pub host: String,
    /// Analysis service port
    #[serde(default = "default_analysis_port")]
    pub port: u16,
    /// Path of the analyze endpoint
    #[serde(default = "default_analyze_path")]
    pub path: String,
    /// Path of the health endpoint
    #[serde(default = "default_health_path")]
    pub health_path: String,
    /// Request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            host: default_analysis_host(),
            port: default_analysis_port(),
            path: default_analyze_path(),
            health_path: default_health_path(),
            timeout_secs: None,
        }
    }
}

fn default_analysis_host() -> String {
    "127.0.0.1".to_string()
}

fn default_analysis_port() -> u16 {
    5000
}

fn default_analyze_path() -> String {
    "/api/analyze".to_string()
}

fn default_health_path() -> String {
    "/api/health".to_string()
}

impl AnalysisConfig {
    /// Base URL of the analysis service, e.g. `http://127.0.0.1:5000`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Absolute URL submissions are posted to
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url(), self.path)
    }

    /// Absolute URL of the service health probe
    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url(), self.health_path)
    }
}

/// Form behavior toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Show a "submission failed" indicator instead of dropping errors silently
    #[serde(default = "default_true")]
    pub report_failures: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            report_failures: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Analysis service settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Form behavior
    #[serde(default)]
    pub form: FormConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound { path: path.display().to_string() }
            } else {
                ConfigError::IoError { message: e.to_string() }
            }
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.analysis.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "analysis.host".to_string(),
                reason: "Host must not be empty".to_string(),
            });
        }

        if self.analysis.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        for (field, value) in [
            ("analysis.path", &self.analysis.path),
            ("analysis.health_path", &self.analysis.health_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "Path must start with '/'".to_string(),
                });
            }
        }

        if self.analysis.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "analysis.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0, or omitted for no timeout".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the form server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.analysis.endpoint_url(), "http://127.0.0.1:5000/api/analyze");
        assert_eq!(config.analysis.health_url(), "http://127.0.0.1:5000/api/health");
        assert!(config.analysis.timeout_secs.is_none());
        assert!(config.form.report_failures);
        assert_eq!(config.listen_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml_str(Config::generate_default()).unwrap();
        assert_eq!(config.analysis.port, 5000);
        assert_eq!(config.analysis.path, "/api/analyze");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml_str("analysis:\n  host: risk.internal\n  port: 5002\n").unwrap();
        assert_eq!(config.analysis.endpoint_url(), "http://risk.internal:5002/api/analyze");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_fire_and_forget_switch() {
        let config = Config::from_yaml_str("form:\n  report_failures: false\n").unwrap();
        assert!(!config.form.report_failures);
    }

    #[test]
    fn test_rejects_zero_port() {
        let err = Config::from_yaml_str("analysis:\n  port: 0\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "analysis.port"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_relative_path() {
        let err = Config::from_yaml_str("analysis:\n  path: api/analyze\n").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(Config::from_yaml_str("analysis:\n  timeout_secs: 0\n").is_err());
        let config = Config::from_yaml_str("analysis:\n  timeout_secs: 5\n").unwrap();
        assert_eq!(config.analysis.timeout_secs, Some(5));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Config::from_yaml_str("logging:\n  level: loud\n").is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml_str("server: [").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(PathBuf::from("/nonexistent/txanalyzer.yaml")).unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::FileNotFound);
    }
}
