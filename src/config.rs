//! Configuration loaded from poster_engine.toml and environment variables

use crate::error::{PosterError, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure. File values come from `poster_engine.toml`
/// (or the path in `POSTER_CONFIG`); env variables override individual
/// fields; secrets live only in the runtime section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RendererConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.fibo.example/v1".to_string(),
            request_timeout_ms: 30_000,
            // 150 attempts at 2s: the 5-minute ceiling
            poll_interval_ms: 2_000,
            poll_max_attempts: 150,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub bucket_id: String,
    pub request_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            bucket_id: "posters".to_string(),
            request_timeout_ms: 20_000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub renderer_api_key: String,
    pub storage_api_key: String,
}

impl Config {
    /// Load configuration from the TOML file (if present) and apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("POSTER_CONFIG").unwrap_or_else(|_| "poster_engine.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw).map_err(|e| PosterError::Config {
                message: format!("failed to parse {}: {}", path, e),
            })?,
            Err(_) => Config::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("POSTER_RENDERER_URL")
            && !url.is_empty()
        {
            self.renderer.base_url = url;
        }
        if let Some(interval) = std::env::var("POSTER_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&v| v >= 100)
        {
            self.renderer.poll_interval_ms = interval;
        }
        if let Some(attempts) = std::env::var("POSTER_POLL_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&v| v > 0)
        {
            self.renderer.poll_max_attempts = attempts;
        }
        if let Ok(endpoint) = std::env::var("POSTER_STORAGE_ENDPOINT")
            && !endpoint.is_empty()
        {
            self.storage.endpoint = endpoint;
            self.storage.enabled = true;
        }
        if let Ok(bucket) = std::env::var("POSTER_STORAGE_BUCKET")
            && !bucket.is_empty()
        {
            self.storage.bucket_id = bucket;
        }
        if let Ok(disable) = std::env::var("POSTER_STORAGE_DISABLE")
            && (disable == "1" || disable.eq_ignore_ascii_case("true"))
        {
            self.storage.enabled = false;
        }

        self.runtime.renderer_api_key = std::env::var("POSTER_FIBO_API_KEY").unwrap_or_default();
        self.runtime.storage_api_key = std::env::var("POSTER_STORAGE_API_KEY").unwrap_or_default();
    }

    pub fn polling(&self) -> crate::clients::PollingConfig {
        crate::clients::PollingConfig {
            interval: std::time::Duration::from_millis(self.renderer.poll_interval_ms),
            max_attempts: self.renderer.poll_max_attempts,
        }
    }
}
