//! Client configuration (base URL, credentials, timeouts).

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

pub const ENV_API_URL: &str = "SHOPADMIN_API_URL";
pub const ENV_API_TOKEN: &str = "SHOPADMIN_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "SHOPADMIN_HTTP_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "SHOPADMIN_PAGE_SIZE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Where and how to reach the admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    /// Page size used when a list query does not name one.
    pub page_size: u32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("{ENV_API_URL} not set; using {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            });
        validate_base_url(&base_url)?;

        let mut config = Self::new(base_url.trim());
        config.token = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = parse_positive(ENV_TIMEOUT_SECS, &raw)?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            let size = parse_positive(ENV_PAGE_SIZE, &raw)?;
            config.page_size = u32::try_from(size).map_err(|_| ConfigError::Invalid {
                key: ENV_PAGE_SIZE,
                message: format!("{size} is too large"),
            })?;
        }

        Ok(config)
    }
}

fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: ENV_API_URL,
            message: format!("`{url}` must start with http:// or https://"),
        })
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid { key, message: "must be greater than zero".into() }),
        Ok(v) => Ok(v),
        Err(e) => Err(ConfigError::Invalid { key, message: e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.token, None);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn reads_all_keys_and_trims_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://admin.example.com/api/"),
            (ENV_API_TOKEN, "secret"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_PAGE_SIZE, "50"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://admin.example.com/api");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "ftp://nope")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_API_URL, .. }));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_PAGE_SIZE, .. }));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_TIMEOUT_SECS, .. }));
    }
}
