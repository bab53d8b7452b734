//! Configuration module for isthisup
//!
//! The watchdog is configured once at startup and the resulting
//! [`WatchdogConfig`] is passed explicitly to every component; nothing reads
//! the environment after that.
//!
//! # Sources
//!
//! 1. Environment variables (`URL`, `PLATFORM`, `API_KEY`, `SLEEP`, `TIMEOUT`,
//!    `RETRY`, `RETRY_TIMEOUT`, `SSL_DAYS_LIMIT`, `LOG_LEVEL`, `LOG_FORMAT`)
//! 2. An optional TOML file, overlaid by whichever environment variables are set
//!
//! Missing required settings and non-integer numbers are errors; the caller
//! is expected to abort.
//!
//! # Example
//!
//! ```rust
//! use isthisup::config::{Platform, WatchdogConfig};
//!
//! let toml = r#"
//! url = "https://example.com/health"
//! platform = "opsgenie"
//! api_key = "secret"
//! sleep_seconds = 60
//! timeout_seconds = 10
//! retry = 3
//! retry_timeout_seconds = 5
//! ssl_days_limit = 14
//! "#;
//! let config: WatchdogConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.platform, Platform::OpsGenie);
//! assert_eq!(config.connectivity.count, 3);
//! ```

pub mod error;
pub mod logging;
pub mod platform;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use platform::Platform;

// Re-export ConnectivityConfig from connectivity module
pub use crate::connectivity::ConnectivityConfig;

use crate::target::Target;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Complete, immutable watchdog configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchdogConfig {
    /// Target URL
    pub url: String,
    /// Incident platform receiving alerts
    pub platform: Platform,
    /// PagerDuty routing key or OpsGenie API key
    pub api_key: String,
    /// Seconds between monitor cycles
    pub sleep_seconds: u64,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum check attempts per cycle
    pub retry: u32,
    /// Seconds between attempts
    pub retry_timeout_seconds: u64,
    /// Minimum remaining certificate validity, in days
    pub ssl_days_limit: u64,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl fmt::Debug for WatchdogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchdogConfig")
            .field("url", &self.url)
            .field("platform", &self.platform)
            .field("api_key", &"<redacted>")
            .field("sleep_seconds", &self.sleep_seconds)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry", &self.retry)
            .field("retry_timeout_seconds", &self.retry_timeout_seconds)
            .field("ssl_days_limit", &self.ssl_days_limit)
            .field("connectivity", &self.connectivity)
            .field("logging", &self.logging)
            .finish()
    }
}

impl WatchdogConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Every watchdog variable is required. `PLATEFORM` is accepted when
    /// `PLATFORM` is absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut logging = LoggingConfig::default();
        logging.apply_lookup(&lookup);

        let config = Self {
            url: required(&lookup, "URL")?,
            platform: parse_platform(&platform_value(&lookup).ok_or_else(|| {
                ConfigError::MissingField("PLATFORM".to_string())
            })?)?,
            api_key: required(&lookup, "API_KEY")?,
            sleep_seconds: parse_integer("SLEEP", &required(&lookup, "SLEEP")?)?,
            timeout_seconds: parse_integer("TIMEOUT", &required(&lookup, "TIMEOUT")?)?,
            retry: parse_integer("RETRY", &required(&lookup, "RETRY")?)?,
            retry_timeout_seconds: parse_integer(
                "RETRY_TIMEOUT",
                &required(&lookup, "RETRY_TIMEOUT")?,
            )?,
            ssl_days_limit: parse_integer("SSL_DAYS_LIMIT", &required(&lookup, "SSL_DAYS_LIMIT")?)?,
            connectivity: ConnectivityConfig::default(),
            logging,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Overlay process environment variables onto a file-based configuration.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlay any variable present in `lookup`, then validate the result.
    /// Unlike the file, a present variable must parse.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("URL") {
            self.url = url;
        }
        if let Some(platform) = platform_value(&lookup) {
            self.platform = parse_platform(&platform)?;
        }
        if let Some(api_key) = lookup("API_KEY") {
            self.api_key = api_key;
        }
        if let Some(v) = lookup("SLEEP") {
            self.sleep_seconds = parse_integer("SLEEP", &v)?;
        }
        if let Some(v) = lookup("TIMEOUT") {
            self.timeout_seconds = parse_integer("TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("RETRY") {
            self.retry = parse_integer("RETRY", &v)?;
        }
        if let Some(v) = lookup("RETRY_TIMEOUT") {
            self.retry_timeout_seconds = parse_integer("RETRY_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("SSL_DAYS_LIMIT") {
            self.ssl_days_limit = parse_integer("SSL_DAYS_LIMIT", &v)?;
        }
        self.logging.apply_lookup(&lookup);

        self.validate()?;
        Ok(self)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        Target::parse(&self.url).map_err(|e| ConfigError::invalid("url", e.to_string()))?;

        if self.api_key.is_empty() {
            return Err(ConfigError::invalid("api_key", "API key cannot be empty"));
        }
        if self.sleep_seconds == 0 {
            return Err(ConfigError::invalid("sleep_seconds", "must be at least 1"));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::invalid("timeout_seconds", "must be at least 1"));
        }
        if self.retry == 0 {
            return Err(ConfigError::invalid("retry", "at least one attempt is required"));
        }
        if self.connectivity.count == 0 {
            return Err(ConfigError::invalid("connectivity.count", "must be at least 1"));
        }
        if self.connectivity.host.is_empty() {
            return Err(ConfigError::invalid("connectivity.host", "host cannot be empty"));
        }

        Ok(())
    }

    /// The parsed target. Only fails if `validate` would.
    pub fn target(&self) -> Result<Target, ConfigError> {
        Target::parse(&self.url).map_err(|e| ConfigError::invalid("url", e.to_string()))
    }

    pub fn sleep_interval(&self) -> Duration {
        Duration::from_secs(self.sleep_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_timeout_seconds)
    }

    pub fn min_certificate_validity(&self) -> Duration {
        Duration::from_secs(self.ssl_days_limit.saturating_mul(SECONDS_PER_DAY))
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| ConfigError::MissingField(key.to_string()))
}

fn platform_value<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("PLATFORM").or_else(|| lookup("PLATEFORM"))
}

fn parse_platform(value: &str) -> Result<Platform, ConfigError> {
    value
        .parse()
        .map_err(|message: String| ConfigError::invalid("PLATFORM", message))
}

fn parse_integer<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("'{}' is not a valid integer", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        [
            ("URL", "https://example.com/health"),
            ("PLATFORM", "pagerduty"),
            ("API_KEY", "routing-key"),
            ("SLEEP", "60"),
            ("TIMEOUT", "10"),
            ("RETRY", "3"),
            ("RETRY_TIMEOUT", "5"),
            ("SSL_DAYS_LIMIT", "14"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect()
    }

    fn from_map(env: &HashMap<&'static str, String>) -> Result<WatchdogConfig, ConfigError> {
        WatchdogConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_from_lookup_full() {
        let config = from_map(&full_env()).unwrap();
        assert_eq!(config.url, "https://example.com/health");
        assert_eq!(config.platform, Platform::PagerDuty);
        assert_eq!(config.api_key, "routing-key");
        assert_eq!(config.sleep_interval(), Duration::from_secs(60));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.retry, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(5));
        assert_eq!(
            config.min_certificate_validity(),
            Duration::from_secs(14 * 24 * 60 * 60)
        );
        assert_eq!(config.connectivity, ConnectivityConfig::default());
    }

    #[test]
    fn test_missing_variable_is_error() {
        for key in ["URL", "API_KEY", "SLEEP", "TIMEOUT", "RETRY", "RETRY_TIMEOUT", "SSL_DAYS_LIMIT"] {
            let mut env = full_env();
            env.remove(key);
            let result = from_map(&env);
            assert!(
                matches!(result, Err(ConfigError::MissingField(ref f)) if f == key),
                "expected MissingField({key}), got {result:?}"
            );
        }
    }

    #[test]
    fn test_missing_platform_is_error() {
        let mut env = full_env();
        env.remove("PLATFORM");
        assert!(matches!(
            from_map(&env),
            Err(ConfigError::MissingField(ref f)) if f == "PLATFORM"
        ));
    }

    #[test]
    fn test_legacy_platform_spelling_accepted() {
        let mut env = full_env();
        env.remove("PLATFORM");
        env.insert("PLATEFORM", "opsgenie".to_string());
        assert_eq!(from_map(&env).unwrap().platform, Platform::OpsGenie);
    }

    #[test]
    fn test_invalid_platform_is_error() {
        let mut env = full_env();
        env.insert("PLATFORM", "slack".to_string());
        assert!(matches!(
            from_map(&env),
            Err(ConfigError::Validation { ref field, .. }) if field == "PLATFORM"
        ));
    }

    #[test]
    fn test_non_integer_is_error() {
        for key in ["SLEEP", "TIMEOUT", "RETRY", "RETRY_TIMEOUT", "SSL_DAYS_LIMIT"] {
            let mut env = full_env();
            env.insert(key, "ten".to_string());
            let result = from_map(&env);
            assert!(
                matches!(result, Err(ConfigError::Validation { ref field, .. }) if field == key),
                "expected Validation({key}), got {result:?}"
            );
        }
    }

    #[test]
    fn test_negative_integer_is_error() {
        let mut env = full_env();
        env.insert("SLEEP", "-5".to_string());
        assert!(from_map(&env).is_err());
    }

    #[test]
    fn test_zero_retry_rejected() {
        let mut env = full_env();
        env.insert("RETRY", "0".to_string());
        assert!(matches!(
            from_map(&env),
            Err(ConfigError::Validation { ref field, .. }) if field == "retry"
        ));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut env = full_env();
        env.insert("URL", "ftp://example.com".to_string());
        assert!(matches!(
            from_map(&env),
            Err(ConfigError::Validation { ref field, .. }) if field == "url"
        ));
    }

    #[test]
    fn test_logging_from_lookup() {
        let mut env = full_env();
        env.insert("LOG_LEVEL", "debug".to_string());
        env.insert("LOG_FORMAT", "json".to_string());
        let config = from_map(&env).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = from_map(&full_env()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("routing-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_config_parse_example_toml() {
        let toml = include_str!("../../isthisup.example.toml");
        let config: WatchdogConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.connectivity.host, "www.google.com");
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            temp.path(),
            r#"
            url = "http://localhost:8080"
            platform = "pagerduty"
            api_key = "k"
            sleep_seconds = 30
            timeout_seconds = 5
            retry = 2
            retry_timeout_seconds = 1
            ssl_days_limit = 7

            [connectivity]
            host = "1.1.1.1"
            "#,
        )
        .unwrap();

        let config = WatchdogConfig::load(temp.path()).unwrap();
        assert_eq!(config.sleep_seconds, 30);
        assert_eq!(config.connectivity.host, "1.1.1.1");
        assert_eq!(config.connectivity.count, 3);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = WatchdogConfig::load(Path::new("/nonexistent/isthisup.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let base = from_map(&full_env()).unwrap();
        let config = base
            .with_overrides_from(|key| match key {
                "RETRY" => Some("7".to_string()),
                "PLATFORM" => Some("opsgenie".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.retry, 7);
        assert_eq!(config.platform, Platform::OpsGenie);
        assert_eq!(config.sleep_seconds, 60);
    }

    #[test]
    fn test_overrides_reject_invalid_values() {
        let base = from_map(&full_env()).unwrap();
        let result = base.with_overrides_from(|key| (key == "TIMEOUT").then(|| "soon".to_string()));
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "TIMEOUT"
        ));
    }

    #[test]
    fn test_overrides_are_validated() {
        let base = from_map(&full_env()).unwrap();
        let result = base.with_overrides_from(|key| (key == "RETRY").then(|| "0".to_string()));
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "retry"
        ));
    }

    #[test]
    fn test_file_with_overrides() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), include_str!("../../isthisup.example.toml")).unwrap();

        let config = WatchdogConfig::load(temp.path())
            .unwrap()
            .with_overrides_from(|key| match key {
                "SLEEP" => Some("15".to_string()),
                "PLATEFORM" => Some("opsgenie".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.sleep_seconds, 15);
        assert_eq!(config.platform, Platform::OpsGenie);
    }
}
