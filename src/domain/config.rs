//! Config - Dashboard Configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL};
use crate::error::{Error, Result};

/// Main configuration consumed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Optional HTTP request timeout; unset means requests may hang
    pub request_timeout_secs: Option<u64>,
    /// Logging options
    pub log: LogConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            log: LogConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Invalid {
                message: format!("base_url must be an http(s) URL, got {:?}", self.base_url),
            });
        }
        if self.request_timeout_secs == Some(0) {
            return Err(Error::Invalid {
                message: "request_timeout_secs must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset
    pub level: String,
    /// Directory for daily-rolling log files; stdout only when unset
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            base_url = "http://grid.example:9000/"

            [log]
            level = "debug"
            "#,
        )
        .expect("config");

        assert_eq!(config.normalized_base_url(), "http://grid.example:9000");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.log.level, "debug");
        assert!(config.log.directory.is_none());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(DashboardConfig::from_toml_str("  \n").expect("config"), DashboardConfig::default());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = DashboardConfig::from_toml_str("base_url = \"ftp://grid\"").expect_err("invalid");
        assert!(matches!(err, Error::Invalid { .. }));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = DashboardConfig::from_toml_str("request_timeout_secs = 0").expect_err("invalid");
        assert!(matches!(err, Error::Invalid { .. }));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DashboardConfig {
            request_timeout_secs: Some(15),
            ..Default::default()
        };
        let text = config.to_toml_string().expect("serialize");
        assert_eq!(DashboardConfig::from_toml_str(&text).expect("parse"), config);
    }
}
