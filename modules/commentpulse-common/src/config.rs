use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::PulseError;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // YouTube Data API
    pub youtube_api_key: String,
    pub youtube_api_base_url: String,

    // Ingestion
    pub comment_cap: usize,
    pub page_size: u32,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,

    // Caching and refresh
    pub cache_ttl: Duration,
    pub refresh_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    /// Fails if `YOUTUBE_API_KEY` is missing or a numeric variable does not parse.
    pub fn from_env() -> Result<Self, PulseError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` passes `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PulseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let youtube_api_key = lookup("YOUTUBE_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                PulseError::Config("YOUTUBE_API_KEY environment variable is required".into())
            })?;

        Ok(Self {
            youtube_api_key,
            youtube_api_base_url: lookup("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            comment_cap: parsed(&lookup, "COMMENT_CAP", 200)?,
            page_size: parsed(&lookup, "PAGE_SIZE", 100)?,
            request_timeout: Duration::from_secs(parsed(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            max_retries: parsed(&lookup, "MAX_RETRIES", 2)?,
            retry_base_delay: Duration::from_millis(parsed(&lookup, "RETRY_BASE_DELAY_MS", 500)?),
            cache_ttl: Duration::from_secs(parsed(&lookup, "CACHE_TTL_SECS", 300)?),
            refresh_interval: Duration::from_secs(parsed(&lookup, "REFRESH_INTERVAL_SECS", 300)?),
        })
    }

    /// Log the effective configuration with the API key masked.
    pub fn log_redacted(&self) {
        info!(
            youtube_api_key = %redact(&self.youtube_api_key),
            youtube_api_base_url = self.youtube_api_base_url.as_str(),
            comment_cap = self.comment_cap,
            page_size = self.page_size,
            request_timeout_secs = self.request_timeout.as_secs(),
            max_retries = self.max_retries,
            retry_base_delay_ms = self.retry_base_delay.as_millis() as u64,
            cache_ttl_secs = self.cache_ttl.as_secs(),
            refresh_interval_secs = self.refresh_interval.as_secs(),
            "Configuration loaded"
        );
    }
}

fn parsed<T, F>(lookup: &F, key: &str, default: T) -> Result<T, PulseError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PulseError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}

fn redact(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        let prefix: String = secret.chars().take(4).collect();
        format!("{prefix}****")
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
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup(&[("YOUTUBE_API_KEY", "AIzaSyTest")])).unwrap();
        assert_eq!(config.comment_cap, 200);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.refresh_interval, Duration::from_secs(300));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_base_delay, Duration::from_millis(500));
        assert_eq!(config.youtube_api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, PulseError::Config(_)));
    }

    #[test]
    fn blank_key_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("YOUTUBE_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, PulseError::Config(_)));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("YOUTUBE_API_KEY", "AIzaSyTest"),
            ("COMMENT_CAP", "50"),
            ("CACHE_TTL_SECS", "0"),
            ("MAX_RETRIES", " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.comment_cap, 50);
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn bad_number_names_the_variable() {
        let err = Config::from_lookup(lookup(&[
            ("YOUTUBE_API_KEY", "AIzaSyTest"),
            ("COMMENT_CAP", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("COMMENT_CAP"));
    }

    #[test]
    fn redaction_keeps_only_a_prefix() {
        assert_eq!(redact("AIzaSyTest"), "AIza****");
        assert_eq!(redact("abc"), "****");
    }
}
