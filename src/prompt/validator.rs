//! Structural checks on a built prompt before it reaches the renderer

use crate::prompt::StructuredPrompt;
use serde::{Deserialize, Serialize};

/// Overlay text longer than this renders poorly; flagged but never fatal.
const TEXT_LENGTH_WARN: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Exhaustive validation: every violated requirement contributes one error
/// string; checking never stops at the first failure.
pub fn validate_structured_prompt(prompt: &StructuredPrompt) -> PromptValidation {
    let mut errors = Vec::new();

    if prompt.short_description.trim().len() < 10 {
        errors.push("short_description must be present and at least 10 characters".to_string());
    }

    if prompt.objects.is_empty() {
        errors.push("objects must not be empty".to_string());
    }
    for (i, object) in prompt.objects.iter().enumerate() {
        if object.description.trim().is_empty() {
            errors.push(format!("objects[{}]: missing description", i));
        }
        if object.location.trim().is_empty() {
            errors.push(format!("objects[{}]: missing location", i));
        }
        if object.shape_and_color.trim().is_empty() {
            errors.push(format!("objects[{}]: missing shape_and_color", i));
        }
    }

    if prompt.background_setting.trim().is_empty() {
        errors.push("background_setting must be present".to_string());
    }

    if prompt.text_render.is_empty() {
        errors.push("text_render must not be empty".to_string());
    }
    for (i, element) in prompt.text_render.iter().enumerate() {
        if element.text.trim().is_empty() {
            errors.push(format!("text_render[{}]: missing text", i));
        }
        if element.location.trim().is_empty() {
            errors.push(format!("text_render[{}]: missing location", i));
        }
        if element.text.chars().count() > TEXT_LENGTH_WARN {
            tracing::warn!(
                index = i,
                chars = element.text.chars().count(),
                "overlay text exceeds {} characters, rendering may degrade",
                TEXT_LENGTH_WARN
            );
        }
    }

    if prompt.artistic_style.trim().is_empty() {
        errors.push("artistic_style must be present".to_string());
    }

    PromptValidation {
        valid: errors.is_empty(),
        errors,
    }
}
