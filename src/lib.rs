//! poster-engine: structured-prompt compilation and layout planning for
//! research-paper explainer posters.
//!
//! The caller hands in a validated paper summary plus a knowledge level; the
//! crate computes a spatial layout, compiles it into a structured
//! image-generation prompt, validates it, drives the external renderer
//! (synchronous or submit-then-poll) and reports a terminal output record.

pub mod clients;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod style;

pub use error::{PosterError, Result};
pub use models::{GenerationInput, GenerationOutput, GenerationStatus, KnowledgeLevel};
pub use orchestrator::Orchestrator;

// Load env from .env if present; silently ignore if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
