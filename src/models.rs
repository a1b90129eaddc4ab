//! Wire types shared across the generation pipeline
//!
//! Everything here is created at the start of one generation request and
//! consumed by the end of it; nothing is cached across requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audience sophistication driving layout, color, typography and wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl KnowledgeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnowledgeLevel::Beginner => "beginner",
            KnowledgeLevel::Intermediate => "intermediate",
            KnowledgeLevel::Advanced => "advanced",
        }
    }
}

/// One key concept extracted by the summarizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    pub explanation: String,
    pub visual_metaphor: String,
}

/// Validated paper summary produced by the (external) summarizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub one_liner: String,
    pub key_concepts: Vec<Concept>,
    pub key_finding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_world_impact: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Single,
    Modular,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default)]
    pub generation_mode: GenerationMode,
    #[serde(default)]
    pub include_layout_previews: bool,
    /// Accepted for round-tripping stored inputs; variation rendering never shipped.
    #[serde(default)]
    pub include_variations: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Icon-style concept images with no rendered text at all
    #[serde(default)]
    pub simple_visuals: bool,
}

/// Entry point to the generation core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInput {
    pub summary: Summary,
    pub knowledge_level: KnowledgeLevel,
    #[serde(default)]
    pub tags: Vec<String>,
    pub arxiv_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<UserPreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
}

impl GenerationInput {
    pub fn mode(&self) -> GenerationMode {
        self.options
            .as_ref()
            .map(|o| o.generation_mode)
            .unwrap_or_default()
    }

    pub fn simple_visuals(&self) -> bool {
        self.user_preferences
            .as_ref()
            .map(|p| p.simple_visuals)
            .unwrap_or(false)
    }
}

/// Semantic bound on summarizer output. The layout engine has its own
/// geometric bound (1..=10) enforced separately; see calculate_layout.
pub const MAX_KEY_CONCEPTS: usize = 6;

/// Validate a `GenerationInput` field by field, accumulating every problem
/// rather than stopping at the first. Errors are prefixed with the field path.
pub fn validate_generation_input(input: &GenerationInput) -> std::result::Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if input.summary.title.trim().is_empty() {
        errors.push("summary.title: must not be empty".to_string());
    }
    if input.summary.one_liner.trim().is_empty() {
        errors.push("summary.one_liner: must not be empty".to_string());
    }
    if input.summary.key_finding.trim().is_empty() {
        errors.push("summary.key_finding: must not be empty".to_string());
    }

    let n = input.summary.key_concepts.len();
    if n == 0 || n > MAX_KEY_CONCEPTS {
        errors.push(format!(
            "summary.key_concepts: expected 1..={} concepts, got {}",
            MAX_KEY_CONCEPTS, n
        ));
    }
    for (i, concept) in input.summary.key_concepts.iter().enumerate() {
        if concept.name.trim().is_empty() {
            errors.push(format!("summary.key_concepts[{}].name: must not be empty", i));
        }
        if concept.explanation.trim().is_empty() {
            errors.push(format!(
                "summary.key_concepts[{}].explanation: must not be empty",
                i
            ));
        }
        if concept.visual_metaphor.trim().is_empty() {
            errors.push(format!(
                "summary.key_concepts[{}].visual_metaphor: must not be empty",
                i
            ));
        }
    }

    if input.arxiv_id.trim().is_empty() {
        errors.push("arxiv_id: must not be empty".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Complete,
    Failed,
}

/// Per-request metadata returned alongside the terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub generation_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fibo_seed: Option<u64>,
    pub knowledge_level: KnowledgeLevel,
    pub timestamp: DateTime<Utc>,
    /// Modular mode only: every successfully rendered section URL, in
    /// section order. Callers needing strict completeness must check the
    /// count against the layout's section count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_file_id: Option<String>,
    /// Single mode only: the validated prompt the final image was rendered
    /// from, kept for reproducibility alongside the seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_prompt: Option<crate::prompt::StructuredPrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_previews: Option<crate::layout::LayoutRecommendations>,
}

/// Immutable result record for one orchestrator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub request_id: String,
    pub status: GenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_image_url: Option<String>,
    pub metadata: GenerationMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(name: &str) -> Concept {
        Concept {
            name: name.to_string(),
            explanation: "A short explanation".to_string(),
            visual_metaphor: "A lighthouse".to_string(),
        }
    }

    fn input(n_concepts: usize) -> GenerationInput {
        GenerationInput {
            summary: Summary {
                title: "Attention Is All You Need".to_string(),
                one_liner: "Transformers replace recurrence with attention".to_string(),
                key_concepts: (0..n_concepts).map(|i| concept(&format!("c{}", i))).collect(),
                key_finding: "Attention suffices".to_string(),
                real_world_impact: None,
            },
            knowledge_level: KnowledgeLevel::Beginner,
            tags: vec![],
            arxiv_id: "1706.03762".to_string(),
            user_preferences: None,
            options: None,
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        assert!(validate_generation_input(&input(3)).is_ok());
    }

    #[test]
    fn rejects_zero_and_excess_concepts() {
        assert!(validate_generation_input(&input(0)).is_err());
        assert!(validate_generation_input(&input(7)).is_err());
        assert!(validate_generation_input(&input(6)).is_ok());
    }

    #[test]
    fn itemizes_every_field_error() {
        let mut bad = input(2);
        bad.summary.title = String::new();
        bad.summary.key_concepts[1].visual_metaphor = "  ".to_string();
        bad.arxiv_id = String::new();
        let errors = validate_generation_input(&bad).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("summary.title"));
        assert!(errors[1].starts_with("summary.key_concepts[1].visual_metaphor"));
        assert!(errors[2].starts_with("arxiv_id"));
    }

    #[test]
    fn mode_defaults_to_single() {
        assert_eq!(input(3).mode(), GenerationMode::Single);
    }
}
