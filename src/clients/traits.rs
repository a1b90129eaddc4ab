//! Seams for the external renderer and storage collaborators

use crate::prompt::StructuredPrompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const SQUARE_1024: ImageSize = ImageSize {
        width: 1024,
        height: 1024,
    };
}

/// Negative-prompt register sent with every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativePrompt {
    /// Poster mode: discourage blurred or illegible text artifacts
    AntiBlur,
    /// Simple-visuals icon mode: discourage any text at all
    NoText,
}

impl NegativePrompt {
    pub fn as_str(&self) -> &'static str {
        match self {
            NegativePrompt::AntiBlur => {
                "blurry text, illegible text, distorted letters, smudged typography, artifacts"
            }
            NegativePrompt::NoText => {
                "text, letters, words, typography, captions, labels, watermarks"
            }
        }
    }
}

/// One render call: a structured prompt plus the parameters the orchestrator
/// controls. The fixed wire parameters (png, steps, guidance) are the
/// client's concern.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub structured_prompt: StructuredPrompt,
    pub seed: u64,
    pub image_size: ImageSize,
    pub negative_prompt: NegativePrompt,
}

/// Handle for an asynchronously running render job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderJob {
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,
}

/// What a submission came back as: some renderers answer synchronously,
/// others hand out a job to poll.
#[derive(Debug, Clone)]
pub enum RenderSubmission {
    Completed { image_url: String },
    Pending { job: RenderJob },
}

#[derive(Debug, Clone)]
pub enum RenderJobStatus {
    Completed { image_url: String },
    Failed { message: String },
    InProgress { status: String },
}

#[derive(Debug, Error)]
pub enum RenderClientError {
    #[error("renderer returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed renderer response: {0}")]
    Malformed(String),
    #[error("render job failed: {0}")]
    JobFailed(String),
    #[error("render polling timed out after {attempts} attempts")]
    PollTimeout { attempts: u32 },
}

#[async_trait]
pub trait Renderer: Send + Sync {
    /// Submit one structured prompt for rendering.
    async fn generate_poster(
        &self,
        request: &RenderRequest,
    ) -> Result<RenderSubmission, RenderClientError>;

    /// Check on a pending job. Terminal statuses are COMPLETED/FAILED,
    /// case-insensitive; anything else means keep polling.
    async fn poll(&self, job: &RenderJob) -> Result<RenderJobStatus, RenderClientError>;
}

/// Bounded polling budget for pending render jobs. One configurable default;
/// 150 attempts at 2s gives a 5-minute ceiling.
#[derive(Debug, Clone, Copy)]
pub struct PollingConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 150,
        }
    }
}

/// Drive a submission to a final image URL, polling if the renderer handed
/// back a job. A poll error on a non-final attempt is retried on the next
/// tick; on the final attempt it propagates.
pub async fn resolve_submission(
    renderer: &dyn Renderer,
    submission: RenderSubmission,
    polling: &PollingConfig,
) -> Result<String, RenderClientError> {
    let job = match submission {
        RenderSubmission::Completed { image_url } => return Ok(image_url),
        RenderSubmission::Pending { job } => job,
    };

    for attempt in 1..=polling.max_attempts {
        tokio::time::sleep(polling.interval).await;
        match renderer.poll(&job).await {
            Ok(RenderJobStatus::Completed { image_url }) => return Ok(image_url),
            Ok(RenderJobStatus::Failed { message }) => {
                return Err(RenderClientError::JobFailed(message));
            }
            Ok(RenderJobStatus::InProgress { status }) => {
                tracing::debug!(job_id = %job.job_id, attempt, %status, "render job still running");
            }
            Err(err) if attempt == polling.max_attempts => return Err(err),
            Err(err) => {
                tracing::warn!(job_id = %job.job_id, attempt, error = %err, "poll failed, retrying");
            }
        }
    }

    Err(RenderClientError::PollTimeout {
        attempts: polling.max_attempts,
    })
}

#[derive(Debug, Error)]
pub enum StorageClientError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("upload failed: {0}")]
    Upload(String),
}

/// Optional object-storage collaborator. Upload failures never fail the
/// overall request; the renderer URL stays authoritative.
#[async_trait]
pub trait PosterStorage: Send + Sync {
    /// Fetch the image behind `image_url` and persist it under `filename`,
    /// returning the storage id.
    async fn upload(&self, image_url: &str, filename: &str)
    -> Result<String, StorageClientError>;
}
