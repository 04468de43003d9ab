//! Configuration loading and representation.

use std::time::Duration;

use thiserror::Error;

/// Connection string used when nothing is configured.
pub const DEFAULT_DATABASE_URL: &str = "mysql://root@127.0.0.1:3306/go_challenge";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Data store connection settings.
///
/// Read from the environment:
/// - `PICKSHEET_DATABASE_URL` (falls back to `DATABASE_URL`, then to
///   [`DEFAULT_DATABASE_URL`])
/// - `PICKSHEET_CONNECT_TIMEOUT_SECS` (default 5)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = match lookup("PICKSHEET_DATABASE_URL").or_else(|| lookup("DATABASE_URL")) {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                tracing::warn!("database URL not set; using local default");
                DEFAULT_DATABASE_URL.to_string()
            }
        };

        let connect_timeout = match lookup("PICKSHEET_CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    key: "PICKSHEET_CONNECT_TIMEOUT_SECS",
                    value: raw.clone(),
                })?,
            None => DEFAULT_CONNECT_TIMEOUT,
        };

        Ok(Self { url, connect_timeout })
    }
}
