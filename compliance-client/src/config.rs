//! Configuration for the compliance client

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Compliance client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout (seconds); `None` leaves requests unbounded
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_base_url() -> String {
    crate::DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with no timeout
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = ClientConfig::default();

        if let Some(base_url) = lookup(crate::BASE_URL_ENV) {
            config.base_url = base_url;
        }

        if let Some(raw) = lookup(crate::TIMEOUT_ENV) {
            let seconds = raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("Invalid {} '{}': {}", crate::TIMEOUT_ENV, raw, e))
            })?;
            config.timeout_seconds = Some(seconds);
        }

        Ok(config)
    }

    /// Timeout as a `Duration`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
