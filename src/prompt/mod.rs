//! Structured prompt wire format consumed by the renderer
//!
//! The renderer takes a schema-constrained description of the image instead
//! of free text: one entry per visual object, explicit text overlays, and
//! aesthetic metadata. Prompts are built fresh per section or poster and
//! never mutated after construction.

pub mod builder;
pub mod validator;

pub use builder::{build, build_concept_section, build_footer_section, build_header_section};
pub use validator::{PromptValidation, validate_structured_prompt};

use serde::{Deserialize, Serialize};

/// One visual object the renderer should place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiboObject {
    pub description: String,
    pub location: String,
    pub relationship: String,
    pub relative_size: String,
    pub shape_and_color: String,
    pub texture: String,
    pub appearance_details: String,
    pub orientation: String,
}

/// One overlay text element. Overlay text is composited as a crisp vector
/// layer on top of the generated image, never synthesized by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextElement {
    pub text: String,
    pub location: String,
    pub size: String,
    pub color: String,
    pub font: String,
    pub appearance_details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPrompt {
    pub short_description: String,
    pub objects: Vec<FiboObject>,
    pub background_setting: String,
    pub text_render: Vec<TextElement>,
    pub lighting: String,
    pub aesthetics: String,
    pub photographic_characteristics: String,
    pub style_medium: String,
    pub context: String,
    pub artistic_style: String,
}
