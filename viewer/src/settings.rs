use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use posts_core::{FetchConfig, DEFAULT_ENDPOINT};

#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = get("POSTS_ENDPOINT")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if endpoint.is_empty() {
            return Err(anyhow!("POSTS_ENDPOINT must not be empty"));
        }

        let request_timeout_secs: u64 = match get("POSTS_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("Failed to parse POSTS_TIMEOUT_SECS, expecting integer")?,
            None => 30,
        };
        if request_timeout_secs == 0 {
            return Err(anyhow!("POSTS_TIMEOUT_SECS must be greater than zero"));
        }

        let log_level = get("LOG_LEVEL")
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            endpoint,
            request_timeout_secs,
            log_level,
        })
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_endpoint(self.endpoint.clone())
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
    }
}
