//! Percentage-based spatial layout engine
//!
//! Turns a concept count, knowledge level and topic tags into a named layout
//! strategy: an ordered list of sections with percent positions and heights.
//! Layouts are value objects; they are computed fresh per request and never
//! mutated afterward.

use crate::error::{PosterError, Result};
use crate::models::KnowledgeLevel;
use serde::{Deserialize, Serialize};

/// Geometric bound on what the strategies can tile. Distinct from the
/// summary-level semantic bound in `models` (1..=6).
pub const MAX_LAYOUT_CONCEPTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    VerticalFlow,
    Grid,
    FPattern,
    Academic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Header,
    Concept,
    Connector,
    Diagram,
    Footer,
}

impl ContentType {
    /// Connector and diagram sections overlay the vertical band of the
    /// content they annotate, so they do not count toward the height budget.
    pub fn is_overlay(&self) -> bool {
        matches!(self, ContentType::Connector | ContentType::Diagram)
    }
}

/// Percent strings ("15%") or the literal "center".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub height_percentage: f32,
    pub position: Position,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutStrategy {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub sections: Vec<Section>,
    pub margins: Margins,
    pub spacing: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Advisory only; has no effect on generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRecommendations {
    pub recommended: LayoutType,
    pub alternatives: Vec<LayoutType>,
    pub reasoning: String,
}

fn pct(v: f32) -> String {
    if (v - v.round()).abs() < 0.05 {
        format!("{}%", v.round() as i64)
    } else {
        format!("{:.1}%", v)
    }
}

fn section(height: f32, x: f32, y: f32, content_type: ContentType) -> Section {
    Section {
        height_percentage: height,
        position: Position {
            x: pct(x),
            y: pct(y),
        },
        content_type,
    }
}

/// Full-width bands anchor horizontally at "center" rather than a percent.
fn band(height: f32, y: f32, content_type: ContentType) -> Section {
    Section {
        height_percentage: height,
        position: Position {
            x: "center".to_string(),
            y: pct(y),
        },
        content_type,
    }
}

fn default_margins() -> Margins {
    Margins {
        top: 5.0,
        right: 5.0,
        bottom: 5.0,
        left: 5.0,
    }
}

/// Compute the spatial layout for a poster.
///
/// Strategy selection is fixed per knowledge level:
/// beginner → vertical_flow, intermediate → grid (≤4 concepts) or
/// f_pattern (>4), advanced → academic. Out-of-range concept counts are
/// rejected, never clamped.
pub fn calculate_layout(
    num_concepts: usize,
    level: KnowledgeLevel,
    tags: &[String],
) -> Result<LayoutStrategy> {
    if num_concepts == 0 || num_concepts > MAX_LAYOUT_CONCEPTS {
        return Err(PosterError::InvalidInput {
            message: format!(
                "concept count must be 1..={}, got {}",
                MAX_LAYOUT_CONCEPTS, num_concepts
            ),
        });
    }

    let layout = match level {
        KnowledgeLevel::Beginner => vertical_flow(num_concepts),
        KnowledgeLevel::Intermediate => {
            if num_concepts <= 4 {
                grid(num_concepts)
            } else {
                f_pattern(num_concepts)
            }
        }
        KnowledgeLevel::Advanced => academic(num_concepts, tags),
    };

    tracing::debug!(
        layout_type = ?layout.layout_type,
        sections = layout.sections.len(),
        "layout computed"
    );
    Ok(layout)
}

/// Header, N equal concept bands, a connector overlay spanning the bands,
/// then footer. Ordered top to bottom by increasing y.
fn vertical_flow(num_concepts: usize) -> LayoutStrategy {
    let header_h = 15.0;
    let footer_h = 10.0;
    let body_h = 100.0 - header_h - footer_h;
    let band_h = body_h / num_concepts as f32;

    let mut sections = vec![band(header_h, 0.0, ContentType::Header)];
    for i in 0..num_concepts {
        let y = header_h + band_h * i as f32;
        sections.push(band(band_h, y, ContentType::Concept));
    }
    // Flow-line overlay across the full concept area
    sections.push(band(body_h, header_h, ContentType::Connector));
    sections.push(band(footer_h, 100.0 - footer_h, ContentType::Footer));

    LayoutStrategy {
        layout_type: LayoutType::VerticalFlow,
        sections,
        margins: default_margins(),
        spacing: 3.0,
    }
}

/// Concepts tiled row-major into min(n, 2) columns over the body height.
fn grid(num_concepts: usize) -> LayoutStrategy {
    let header_h = 20.0;
    let footer_h = 12.0;
    let body_h = 100.0 - header_h - footer_h;
    let columns = num_concepts.min(2);
    let rows = num_concepts.div_ceil(columns);
    let cell_h = body_h / rows as f32;
    let cell_w = 100.0 / columns as f32;

    let mut sections = vec![band(header_h, 0.0, ContentType::Header)];
    for i in 0..num_concepts {
        let row = i / columns;
        let col = i % columns;
        let y = header_h + cell_h * row as f32;
        if columns == 1 {
            sections.push(band(cell_h, y, ContentType::Concept));
        } else {
            sections.push(section(cell_h, cell_w * col as f32, y, ContentType::Concept));
        }
    }
    sections.push(band(footer_h, 100.0 - footer_h, ContentType::Footer));

    LayoutStrategy {
        layout_type: LayoutType::Grid,
        sections,
        margins: default_margins(),
        spacing: 2.0,
    }
}

/// First concept gets a full-width band (25% of the body), the rest tile
/// two columns over the remaining 75%, row-major.
fn f_pattern(num_concepts: usize) -> LayoutStrategy {
    let header_h = 18.0;
    let footer_h = 10.0;
    let body_h = 100.0 - header_h - footer_h;
    let lead_h = body_h * 0.25;
    let rest = num_concepts - 1;
    let rest_rows = rest.div_ceil(2);
    let rest_h = (body_h * 0.75) / rest_rows as f32;

    let mut sections = vec![band(header_h, 0.0, ContentType::Header)];
    sections.push(band(lead_h, header_h, ContentType::Concept));
    for i in 0..rest {
        let row = i / 2;
        let col = i % 2;
        let x = 50.0 * col as f32;
        let y = header_h + lead_h + rest_h * row as f32;
        sections.push(section(rest_h, x, y, ContentType::Concept));
    }
    sections.push(band(footer_h, 100.0 - footer_h, ContentType::Footer));

    LayoutStrategy {
        layout_type: LayoutType::FPattern,
        sections,
        margins: default_margins(),
        spacing: 2.0,
    }
}

/// Dense single-column stack, or a two-column concept/diagram arrangement
/// when the topic tags suggest diagrams will land ("mathematical"/"visual")
/// and there are enough concepts to fill both columns.
fn academic(num_concepts: usize, tags: &[String]) -> LayoutStrategy {
    let header_h = 15.0;
    let footer_h = 8.0;
    let body_h = 100.0 - header_h - footer_h;

    let diagram_tagged = tags
        .iter()
        .any(|t| t.eq_ignore_ascii_case("mathematical") || t.eq_ignore_ascii_case("visual"));

    let mut sections = vec![band(header_h, 0.0, ContentType::Header)];
    let row_h = body_h / num_concepts as f32;
    if diagram_tagged && num_concepts >= 4 {
        for i in 0..num_concepts {
            let y = header_h + row_h * i as f32;
            // Alternate which side carries the diagram, row by row
            let (concept_x, diagram_x) = if i % 2 == 0 { (0.0, 50.0) } else { (50.0, 0.0) };
            sections.push(section(row_h, concept_x, y, ContentType::Concept));
            sections.push(section(row_h, diagram_x, y, ContentType::Diagram));
        }
    } else {
        for i in 0..num_concepts {
            let y = header_h + row_h * i as f32;
            sections.push(band(row_h, y, ContentType::Concept));
        }
    }
    sections.push(band(footer_h, 100.0 - footer_h, ContentType::Footer));

    LayoutStrategy {
        layout_type: LayoutType::Academic,
        sections,
        margins: default_margins(),
        spacing: 1.5,
    }
}

/// Structural checks on a computed layout. A height sum off 100±5 is only a
/// logged diagnostic; margin pairs eating half an axis are hard errors.
pub fn validate_layout(layout: &LayoutStrategy) -> LayoutValidation {
    let mut errors = Vec::new();

    let height_sum: f32 = layout
        .sections
        .iter()
        .filter(|s| !s.content_type.is_overlay())
        .map(|s| s.height_percentage)
        .sum();
    if (height_sum - 100.0).abs() > 5.0 {
        tracing::warn!(
            height_sum,
            "section heights deviate from 100% beyond tolerance"
        );
    }

    let m = &layout.margins;
    if m.top + m.bottom >= 50.0 {
        errors.push(format!(
            "vertical margins consume {}% of the canvas",
            m.top + m.bottom
        ));
    }
    if m.left + m.right >= 50.0 {
        errors.push(format!(
            "horizontal margins consume {}% of the canvas",
            m.left + m.right
        ));
    }

    LayoutValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Advisory metadata for frontend previews; never feeds back into generation.
pub fn recommendations(
    num_concepts: usize,
    level: KnowledgeLevel,
    tags: &[String],
) -> LayoutRecommendations {
    let (recommended, reasoning) = match level {
        KnowledgeLevel::Beginner => (
            LayoutType::VerticalFlow,
            "top-to-bottom flow reads naturally for first-time audiences".to_string(),
        ),
        KnowledgeLevel::Intermediate if num_concepts <= 4 => (
            LayoutType::Grid,
            format!("{} concepts tile cleanly into a two-column grid", num_concepts),
        ),
        KnowledgeLevel::Intermediate => (
            LayoutType::FPattern,
            "a lead band plus two columns keeps many concepts scannable".to_string(),
        ),
        KnowledgeLevel::Advanced => {
            let diagrams = tags
                .iter()
                .any(|t| t.eq_ignore_ascii_case("mathematical") || t.eq_ignore_ascii_case("visual"));
            (
                LayoutType::Academic,
                if diagrams && num_concepts >= 4 {
                    "tags suggest diagram-heavy content; paired columns fit".to_string()
                } else {
                    "dense single-column stack suits expert reading".to_string()
                },
            )
        }
    };

    let alternatives = [
        LayoutType::VerticalFlow,
        LayoutType::Grid,
        LayoutType::FPattern,
        LayoutType::Academic,
    ]
    .into_iter()
    .filter(|t| *t != recommended)
    .collect();

    LayoutRecommendations {
        recommended,
        alternatives,
        reasoning,
    }
}

/// Coarse 2D anchor label for human-readable prompt text, e.g. "top center".
pub fn position_string(section: &Section) -> String {
    let horizontal = match section.position.x.trim_end_matches('%').parse::<f32>() {
        Ok(x) if x < 40.0 => "left",
        Ok(x) if x > 60.0 => "right",
        _ => "center",
    };
    let y = &section.position.y;
    let vertical = if y == "0%" {
        "top"
    } else if y.contains("90") || y.contains("100") {
        "bottom"
    } else {
        "middle"
    };
    format!("{} {}", vertical, horizontal)
}
