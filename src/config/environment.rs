use reqwest::Url;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

use super::duration::RawDuration;
use super::ConfigError;
use crate::services::scrape::ScrapeTarget;

/// Prefix shared by every environment variable the daemon reads.
pub const ENV_PREFIX: &str = "LORALUX";

pub const DEFAULT_LOG_LEVEL: i8 = 0;
pub const DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8080";
pub const DEFAULT_SCRAPE_ENDPOINT: &str = "/scrape";
pub const DEFAULT_SCRAPE_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Log levels use the zap numbering: -1 debug, 0 info, 1 warn, 2..=5 error.
pub const MIN_LOG_LEVEL: i8 = -1;
pub const MAX_LOG_LEVEL: i8 = 5;

/// Validated settings for the scrape daemon
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: i8,
    pub server_address: String,
    pub scrape_endpoint: String,
    pub scrape_interval: Duration,
    pub read_timeout: Duration,
}

/// Settings as read from a source, before defaults and validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawConfig {
    log_level: Option<i8>,
    server_address: Option<String>,
    scrape_endpoint: Option<String>,
    scrape_interval: Option<RawDuration>,
    read_timeout: Option<RawDuration>,
}

impl Config {
    /// Load configuration from `LORALUX_*` environment variables.
    /// A `.env` file in the working directory is picked up when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = match env_var("LOG_LEVEL") {
            Some(value) => Some(value.trim().parse::<i8>().map_err(|_| ConfigError::Env {
                key: env_key("LOG_LEVEL"),
                value,
            })?),
            None => None,
        };

        let raw = RawConfig {
            log_level,
            server_address: env_var("SERVER_ADDRESS"),
            scrape_endpoint: env_var("SCRAPE_ENDPOINT"),
            scrape_interval: env_var("SCRAPE_INTERVAL").map(RawDuration::Text),
            read_timeout: env_var("READ_TIMEOUT").map(RawDuration::Text),
        };

        raw.into_config()
    }

    /// Load configuration from a JSON or YAML file, picked by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let raw: RawConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            Some("yaml") | Some("yml") => {
                let content = std::fs::read_to_string(path)?;
                serde_yaml::from_str(&content)?
            }
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        raw.into_config()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LOG_LEVEL..=MAX_LOG_LEVEL).contains(&self.log_level) {
            return Err(ConfigError::Invalid(format!(
                "log level must be [{}, {}]",
                MIN_LOG_LEVEL, MAX_LOG_LEVEL
            )));
        }

        let address = Url::parse(&self.server_address).map_err(|e| {
            ConfigError::Invalid(format!("server address must be a valid URI: {}", e))
        })?;
        if !address.has_host() {
            return Err(ConfigError::Invalid(
                "server address must be a valid URI: missing host".to_string(),
            ));
        }

        if !self.scrape_endpoint.starts_with('/') {
            return Err(ConfigError::Invalid(
                "scrape endpoint must be supplied and start with a /".to_string(),
            ));
        }

        if self.scrape_interval.is_zero() {
            return Err(ConfigError::Invalid("scrape interval must be > 0ms".to_string()));
        }

        if self.read_timeout.is_zero() {
            return Err(ConfigError::Invalid("read timeout must be > 0ms".to_string()));
        }

        Ok(())
    }

    pub fn scrape_target(&self) -> ScrapeTarget {
        ScrapeTarget::new(&self.server_address, &self.scrape_endpoint, self.read_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            scrape_endpoint: DEFAULT_SCRAPE_ENDPOINT.to_string(),
            scrape_interval: DEFAULT_SCRAPE_INTERVAL,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl RawConfig {
    /// Fill unset or empty values with defaults, then validate.
    fn into_config(self) -> Result<Config, ConfigError> {
        let config = Config {
            log_level: self.log_level.unwrap_or(DEFAULT_LOG_LEVEL),
            server_address: non_empty_or(self.server_address, DEFAULT_SERVER_ADDRESS),
            scrape_endpoint: non_empty_or(self.scrape_endpoint, DEFAULT_SCRAPE_ENDPOINT),
            scrape_interval: non_zero_or(self.scrape_interval, DEFAULT_SCRAPE_INTERVAL)?,
            read_timeout: non_zero_or(self.read_timeout, DEFAULT_READ_TIMEOUT)?,
        };

        config.validate()?;
        Ok(config)
    }
}

fn env_key(name: &str) -> String {
    format!("{}_{}", ENV_PREFIX, name)
}

fn env_var(name: &str) -> Option<String> {
    env::var(env_key(name)).ok().filter(|value| !value.is_empty())
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn non_zero_or(value: Option<RawDuration>, default: Duration) -> Result<Duration, ConfigError> {
    match value {
        Some(raw) => {
            let duration = raw.into_duration()?;
            Ok(if duration.is_zero() { default } else { duration })
        }
        None => Ok(default),
    }
}
