pub mod fibo;
pub mod storage;
pub mod traits;

pub use fibo::FiboClient;
pub use storage::HttpStorage;
pub use traits::{
    ImageSize, NegativePrompt, PollingConfig, PosterStorage, RenderClientError, RenderJob,
    RenderJobStatus, RenderRequest, RenderSubmission, Renderer, StorageClientError,
    resolve_submission,
};
