//! HTTP client for the structured-prompt image-generation service

use crate::clients::traits::{
    RenderClientError, RenderJob, RenderJobStatus, RenderRequest, RenderSubmission, Renderer,
};
use crate::config::RendererConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Fixed wire parameters the core always sends.
const OUTPUT_FORMAT: &str = "png";
const STEPS_NUM: u32 = 50;
const GUIDANCE_SCALE: u32 = 5;

pub struct FiboClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    structured_prompt: &'a crate::prompt::StructuredPrompt,
    negative_prompt: &'a str,
    seed: u64,
    image_size: crate::clients::traits::ImageSize,
    output_format: &'static str,
    steps_num: u32,
    guidance_scale: u32,
}

/// Either shape can come back: a synchronous result or a job handle.
#[derive(Deserialize)]
struct GenerateResponse {
    image_url: Option<String>,
    request_id: Option<String>,
    status_url: Option<String>,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: Option<String>,
    image_url: Option<String>,
    result: Option<StatusResult>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct StatusResult {
    image_url: Option<String>,
}

impl FiboClient {
    pub fn new(config: &RendererConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .context("Failed to build reqwest client with timeout")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn status_url(&self, job: &RenderJob) -> String {
        job.status_url
            .clone()
            .unwrap_or_else(|| format!("{}/status/{}", self.base_url, job.job_id))
    }
}

#[async_trait]
impl Renderer for FiboClient {
    async fn generate_poster(
        &self,
        request: &RenderRequest,
    ) -> Result<RenderSubmission, RenderClientError> {
        let body = GenerateBody {
            structured_prompt: &request.structured_prompt,
            negative_prompt: request.negative_prompt.as_str(),
            seed: request.seed,
            image_size: request.image_size,
            output_format: OUTPUT_FORMAT,
            steps_num: STEPS_NUM,
            guidance_scale: GUIDANCE_SCALE,
        };

        debug!(
            seed = request.seed,
            objects = request.structured_prompt.objects.len(),
            "submitting render request"
        );

        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RenderClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RenderClientError::Http { status, body });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RenderClientError::Malformed(e.to_string()))?;

        if let Some(image_url) = parsed.image_url {
            return Ok(RenderSubmission::Completed { image_url });
        }
        match parsed.request_id {
            Some(job_id) => Ok(RenderSubmission::Pending {
                job: RenderJob {
                    job_id,
                    status_url: parsed.status_url,
                },
            }),
            None => Err(RenderClientError::Malformed(
                "response carried neither image_url nor request_id".to_string(),
            )),
        }
    }

    async fn poll(&self, job: &RenderJob) -> Result<RenderJobStatus, RenderClientError> {
        let response = self
            .client
            .get(self.status_url(job))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| RenderClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RenderClientError::Http { status, body });
        }

        let parsed: StatusResponse = response
            .json()
            .await
            .map_err(|e| RenderClientError::Malformed(e.to_string()))?;

        let status = parsed.status.unwrap_or_default();
        let upper = status.to_uppercase();
        if upper == "COMPLETED" {
            let image_url = parsed
                .image_url
                .or_else(|| parsed.result.and_then(|r| r.image_url));
            return match image_url {
                Some(image_url) => Ok(RenderJobStatus::Completed { image_url }),
                None => Err(RenderClientError::Malformed(
                    "completed job carried no image_url".to_string(),
                )),
            };
        }
        if upper == "FAILED" || upper == "ERROR" {
            let message = parsed
                .error
                .unwrap_or_else(|| json!({ "status": status }).to_string());
            return Ok(RenderJobStatus::Failed { message });
        }
        Ok(RenderJobStatus::InProgress { status })
    }
}
