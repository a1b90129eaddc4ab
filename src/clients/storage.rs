//! Fetch-then-upload object storage client

use crate::clients::traits::{PosterStorage, StorageClientError};
use crate::config::StorageConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub struct HttpStorage {
    client: reqwest::Client,
    endpoint: String,
    bucket_id: String,
    api_key: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    id: String,
}

impl HttpStorage {
    pub fn new(config: &StorageConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .context("Failed to build reqwest client with timeout")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket_id: config.bucket_id.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl PosterStorage for HttpStorage {
    async fn upload(
        &self,
        image_url: &str,
        filename: &str,
    ) -> Result<String, StorageClientError> {
        // The renderer URL is short-lived; pull the bytes down first.
        let image = self
            .client
            .get(image_url)
            .send()
            .await
            .map_err(|e| StorageClientError::Fetch(e.to_string()))?;
        if !image.status().is_success() {
            return Err(StorageClientError::Fetch(format!(
                "HTTP {} fetching rendered image",
                image.status()
            )));
        }
        let bytes = image
            .bytes()
            .await
            .map_err(|e| StorageClientError::Fetch(e.to_string()))?;

        debug!(filename, bytes = bytes.len(), "uploading rendered image");

        let response = self
            .client
            .post(format!(
                "{}/buckets/{}/files/{}",
                self.endpoint, self.bucket_id, filename
            ))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "image/png")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| StorageClientError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageClientError::Upload(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageClientError::Upload(e.to_string()))?;
        Ok(parsed.id)
    }
}
