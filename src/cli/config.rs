//! Configuration management for the sarcasm detector
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.sarcasm-detector/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::errors::{AppError, Result};

/// Default backend host
pub const DEFAULT_HOST: &str = "localhost";

/// Default backend port
pub const DEFAULT_PORT: u16 = 7860;

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Backend location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
    /// Full base URL, takes precedence over host/port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Network budgets in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    pub health_ms: u64,
    pub predict_ms: u64,
}

/// Input constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_chars: usize,
}

/// Health cache policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Unset means the first probe result is kept for the process lifetime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
    pub color_output: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            url: None,
        }
    }
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            health_ms: 2_000,
            predict_ms: 30_000,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { max_chars: 1000 }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, or built-in defaults when absent
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sarcasm-detector").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.timeouts.health_ms == 0 || self.timeouts.predict_ms == 0 {
            return Err(AppError::ConfigError(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        if self.input.max_chars == 0 {
            return Err(AppError::ConfigError(
                "max_chars must be greater than 0".to_string(),
            ));
        }

        if self.health.cache_ttl_secs == Some(0) {
            return Err(AppError::ConfigError(
                "cache_ttl_secs must be greater than 0 when set".to_string(),
            ));
        }

        match self.telemetry.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => {
                return Err(AppError::ConfigError(format!(
                    "Invalid verbosity level: {}",
                    self.telemetry.default_verbosity
                )))
            }
        }

        self.base_url()?;
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AppError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AppError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Backend base URL, from `backend.url` or host and port
    pub fn base_url(&self) -> Result<Url> {
        let raw = match &self.backend.url {
            Some(url) => url.clone(),
            None => format!("http://{}:{}", self.backend.host, self.backend.port),
        };
        Ok(Url::parse(&raw)?)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.health_ms)
    }

    pub fn predict_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.predict_ms)
    }

    /// Health cache lifetime, `None` for the whole process
    pub fn health_cache_ttl(&self) -> Option<Duration> {
        self.health.cache_ttl_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.host, "localhost");
        assert_eq!(config.backend.port, 7860);
        assert_eq!(config.timeouts.health_ms, 2_000);
        assert_eq!(config.timeouts.predict_ms, 30_000);
        assert_eq!(config.input.max_chars, 1000);
        assert!(config.health.cache_ttl_secs.is_none());
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.timeouts.predict_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_max_chars() {
        let mut config = Config::default();
        config.input.max_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_verbosity() {
        let mut config = Config::default();
        config.telemetry.default_verbosity = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = Config::default();
        config.backend.url = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(AppError::InvalidUrl(_))));
    }

    #[test]
    fn test_base_url_from_host_and_port() {
        let config = Config::default();
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:7860/");
    }

    #[test]
    fn test_base_url_override() {
        let mut config = Config::default();
        config.backend.url = Some("https://sarcasm.example.com/api/".to_string());
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://sarcasm.example.com/api/"
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config =
            toml::from_str("[backend]\nhost = \"10.0.0.5\"\nport = 9000\n").unwrap();
        assert_eq!(config.base_url().unwrap().as_str(), "http://10.0.0.5:9000/");
        assert_eq!(config.timeouts.predict_ms, 30_000);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.health.cache_ttl_secs = Some(60);
        config.save(&path).unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded.health_cache_ttl(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_load_unparseable_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timeouts]\npredict_ms = \"soon\"\n").unwrap();

        match Config::load_from_file(&path) {
            Err(AppError::ConfigError(message)) => {
                assert!(message.starts_with("Failed to parse config"))
            }
            other => panic!("expected ConfigError, got: {:?}", other.map(|_| ())),
        }
    }
}
