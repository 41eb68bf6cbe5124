//! Layered configuration: defaults, TOML file, `.env` + environment.
//!
//! Command-line overrides are applied by the binary on top of [`Config::load`].
//! The resolved API base URL is handed to the client explicitly; nothing here
//! is global.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_BASE: &str = "MARKET_AGENT_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "MARKET_AGENT_TIMEOUT_SECS";
pub const ENV_LOG: &str = "MARKET_AGENT_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL. `None` means "not configured", which falls back to
    /// [`DEFAULT_API_BASE`].
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub log: LogConfig,
    /// `.env` file picked up by [`Config::load`]. Logged by the binary once
    /// the subscriber is installed.
    #[serde(skip)]
    pub env_file: Option<PathBuf>,
}

impl Config {
    /// `<config dir>/market-agent/config.toml`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("market-agent").join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Build the configuration from every layer except the command line.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::load_file(&p)?,
                _ => Self::default(),
            },
        };

        config.env_file = dotenvy::dotenv().ok();
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` as the variable source.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = Some(base);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number, got '{raw}'"
                ))
            })?;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log.filter = filter;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.api.base_url {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "api base url must start with http:// or https://, got '{base}'"
                )));
            }
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Base URL without trailing slashes, defaulted when unset.
    pub fn base_url(&self) -> String {
        let base = self.api.base_url.as_deref().unwrap_or(DEFAULT_API_BASE);
        base.trim_end_matches('/').to_string()
    }

    pub fn base_url_is_default(&self) -> bool {
        self.api.base_url.is_none()
    }

    /// Configured log file, or `<data dir>/market-agent/market-agent.log`.
    pub fn log_file(&self) -> PathBuf {
        self.log.file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("market-agent")
                .join("market-agent.log")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.base_url(), DEFAULT_API_BASE);
        assert!(c.base_url_is_default());
        assert_eq!(c.api.timeout_secs, 15);
        assert_eq!(c.log.filter, "info");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = Config::from_toml_str(
            r#"
            [api]
            base_url = "https://agent.example.com/"
            "#,
        )
        .unwrap();
        assert_eq!(c.base_url(), "https://agent.example.com");
        assert_eq!(c.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!c.base_url_is_default());
    }

    #[test]
    fn env_overrides_file() {
        let mut c = Config::from_toml_str("[api]\nbase_url = \"http://a:1\"\n").unwrap();
        let vars = env(&[
            (ENV_API_BASE, "http://b:2"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_LOG, "debug"),
        ]);
        c.apply_env_with(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(c.base_url(), "http://b:2");
        assert_eq!(c.api.timeout_secs, 3);
        assert_eq!(c.log.filter, "debug");
    }

    #[test]
    fn blank_env_base_is_ignored() {
        let mut c = Config::default();
        let vars = env(&[(ENV_API_BASE, "  ")]);
        c.apply_env_with(|k| vars.get(k).cloned()).unwrap();
        assert!(c.base_url_is_default());
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let mut c = Config::default();
        let vars = env(&[(ENV_TIMEOUT_SECS, "soon")]);
        let err = c.apply_env_with(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn validate_rejects_non_http_base() {
        let mut c = Config::default();
        c.api.base_url = Some("localhost:8000".into());
        assert!(c.validate().is_err());
        c.api.base_url = Some("http://localhost:8000".into());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load_file(Path::new("/nonexistent/market-agent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn env_file_is_not_a_toml_key() {
        let c = Config::from_toml_str("env_file = \"/tmp/.env\"\n").unwrap();
        assert_eq!(c.env_file, None);
        assert_eq!(c, Config::default());
    }

    #[test]
    fn explicit_log_file_wins() {
        let mut c = Config::default();
        c.log.file = Some(PathBuf::from("/tmp/x.log"));
        assert_eq!(c.log_file(), PathBuf::from("/tmp/x.log"));
    }
}
