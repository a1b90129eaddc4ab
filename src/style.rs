//! Color scheme and typography tables keyed by knowledge level
//!
//! Pure, total lookups over the closed `KnowledgeLevel` enum. Unknown levels
//! cannot reach this module; input validation rejects them upstream.

use crate::models::KnowledgeLevel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    /// Small rotation palette for concept containers and object tinting
    pub concept_palette: [&'static str; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Typography {
    pub font_family: &'static str,
    pub title_pt: u32,
    pub subtitle_pt: u32,
    pub heading_pt: u32,
    pub body_pt: u32,
    pub callout_pt: u32,
    pub caption_pt: u32,
}

/// Fixed palette per audience level.
pub fn color_scheme(level: KnowledgeLevel) -> ColorScheme {
    match level {
        KnowledgeLevel::Beginner => ColorScheme {
            primary: "#4A90D9",
            secondary: "#7BC67E",
            accent: "#F5A623",
            background: "#FDFBF7",
            text: "#2D3436",
            concept_palette: ["#E8F4FD", "#EAF7EB", "#FEF3E2", "#F3E8FD"],
        },
        KnowledgeLevel::Intermediate => ColorScheme {
            primary: "#2C5F8A",
            secondary: "#3E8E7E",
            accent: "#D97706",
            background: "#FAFAF8",
            text: "#1F2937",
            concept_palette: ["#DBEAFE", "#D1FAE5", "#FEF3C7", "#E0E7FF"],
        },
        KnowledgeLevel::Advanced => ColorScheme {
            primary: "#1E3A5F",
            secondary: "#374151",
            accent: "#B45309",
            background: "#FFFFFF",
            text: "#111827",
            concept_palette: ["#F1F5F9", "#F8FAFC", "#F5F5F4", "#FAFAF9"],
        },
    }
}

/// Font family and per-role sizes. The pt values here are the same table the
/// prompt builder embeds in overlay-text appearance details.
pub fn typography(level: KnowledgeLevel) -> Typography {
    match level {
        KnowledgeLevel::Beginner => Typography {
            font_family: "Nunito, rounded sans-serif",
            title_pt: 72,
            subtitle_pt: 24,
            heading_pt: 28,
            body_pt: 16,
            callout_pt: 20,
            caption_pt: 12,
        },
        KnowledgeLevel::Intermediate => Typography {
            font_family: "Inter, clean sans-serif",
            title_pt: 72,
            subtitle_pt: 24,
            heading_pt: 28,
            body_pt: 16,
            callout_pt: 20,
            caption_pt: 12,
        },
        KnowledgeLevel::Advanced => Typography {
            font_family: "Source Serif Pro, academic serif",
            title_pt: 72,
            subtitle_pt: 24,
            heading_pt: 28,
            body_pt: 16,
            callout_pt: 20,
            caption_pt: 12,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes_are_distinct_per_level() {
        let b = color_scheme(KnowledgeLevel::Beginner);
        let i = color_scheme(KnowledgeLevel::Intermediate);
        let a = color_scheme(KnowledgeLevel::Advanced);
        assert_ne!(b, i);
        assert_ne!(i, a);
    }

    #[test]
    fn typography_carries_fixed_role_sizes() {
        for level in [
            KnowledgeLevel::Beginner,
            KnowledgeLevel::Intermediate,
            KnowledgeLevel::Advanced,
        ] {
            let t = typography(level);
            assert_eq!(t.title_pt, 72);
            assert_eq!(t.body_pt, 16);
            assert_eq!(t.caption_pt, 12);
        }
    }
}
