//! Deterministic mapping from a paper summary to structured prompts
//!
//! Pure functions of their arguments: no I/O and no randomness. The seed is
//! the orchestrator's concern. The single-poster `build` and the modular
//! section builders share the same per-field helpers, so a modular section
//! is always a fully valid independent prompt.

use crate::layout::{ContentType, LayoutStrategy, Section, position_string};
use crate::models::{Concept, GenerationInput, KnowledgeLevel};
use crate::prompt::{FiboObject, StructuredPrompt, TextElement};
use crate::style::{ColorScheme, Typography, color_scheme, typography};

/// Concept body text is cut for rendering here, never upstream in the summary.
pub const MAX_EXPLANATION_CHARS: usize = 150;
/// Footer callout budget for the key finding.
pub const MAX_KEY_FINDING_CHARS: usize = 100;

/// Hard substring cut plus a trailing ellipsis when over budget.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Object tint rotation, distinct from the 4-swatch container cycle.
fn object_palette(level: KnowledgeLevel) -> [&'static str; 3] {
    match level {
        KnowledgeLevel::Beginner => ["#4A90D9", "#7BC67E", "#F5A623"],
        KnowledgeLevel::Intermediate => ["#2C5F8A", "#3E8E7E", "#D97706"],
        KnowledgeLevel::Advanced => ["#1E3A5F", "#374151", "#B45309"],
    }
}

fn visual_style(level: KnowledgeLevel) -> &'static str {
    match level {
        KnowledgeLevel::Beginner => {
            "friendly cartoon illustration with soft rounded shapes and simple iconography"
        }
        KnowledgeLevel::Intermediate => {
            "clean labeled diagram with clear callout lines and structured annotations"
        }
        KnowledgeLevel::Advanced => {
            "precise annotated technical figure with mathematical notation and exact geometry"
        }
    }
}

fn lighting(level: KnowledgeLevel) -> &'static str {
    match level {
        KnowledgeLevel::Beginner => "soft even daylight, no harsh shadows",
        KnowledgeLevel::Intermediate => "neutral studio lighting with gentle depth",
        KnowledgeLevel::Advanced => "flat technical illumination, print-like uniformity",
    }
}

fn aesthetics(level: KnowledgeLevel) -> &'static str {
    match level {
        KnowledgeLevel::Beginner => "playful, warm, approachable infographic aesthetics",
        KnowledgeLevel::Intermediate => "modern editorial infographic aesthetics",
        KnowledgeLevel::Advanced => "restrained academic figure aesthetics",
    }
}

fn photographic(level: KnowledgeLevel) -> &'static str {
    match level {
        KnowledgeLevel::Beginner => "flat vector rendering, saturated colors, no depth of field",
        KnowledgeLevel::Intermediate => "flat vector rendering, balanced palette, crisp edges",
        KnowledgeLevel::Advanced => "flat monochrome-leaning rendering, hairline strokes",
    }
}

fn style_medium(level: KnowledgeLevel) -> &'static str {
    match level {
        KnowledgeLevel::Beginner => "digital vector illustration",
        KnowledgeLevel::Intermediate => "digital flat-design illustration",
        KnowledgeLevel::Advanced => "technical line art",
    }
}

fn artistic_style(level: KnowledgeLevel) -> &'static str {
    match level {
        KnowledgeLevel::Beginner => "friendly cartoon infographic style",
        KnowledgeLevel::Intermediate => "clean flat-design infographic style",
        KnowledgeLevel::Advanced => "precise academic diagram style",
    }
}

fn relative_size(section: &Section) -> String {
    format!("{:.0}% of canvas height", section.height_percentage)
}

fn overlay_details(role: &str, size_pt: u32) -> String {
    format!(
        "{} rendered as a crisp vector overlay layer composited on the image, \
         never diffusion-generated, target {}pt equivalent",
        role, size_pt
    )
}

fn text_element(
    text: String,
    location: String,
    size_pt: u32,
    color: &str,
    typo: &Typography,
    role: &str,
) -> TextElement {
    TextElement {
        text,
        location,
        size: format!("{}pt", size_pt),
        color: color.to_string(),
        font: typo.font_family.to_string(),
        appearance_details: overlay_details(role, size_pt),
    }
}

fn banner_object(section: &Section, scheme: &ColorScheme, level: KnowledgeLevel) -> FiboObject {
    FiboObject {
        description: format!("poster banner band, {}", visual_style(level)),
        location: position_string(section),
        relationship: "frames the poster content".to_string(),
        relative_size: relative_size(section),
        shape_and_color: format!(
            "full-width band with a gradient from {} to {}",
            scheme.primary, scheme.secondary
        ),
        texture: "smooth matte".to_string(),
        appearance_details: "clean edges, no text baked into the band".to_string(),
        orientation: "horizontal".to_string(),
    }
}

fn concept_object(
    concept: &Concept,
    index: usize,
    section: &Section,
    scheme: &ColorScheme,
    level: KnowledgeLevel,
) -> FiboObject {
    let palette = object_palette(level);
    let tint = palette[index % palette.len()];
    let container = scheme.concept_palette[index % scheme.concept_palette.len()];
    FiboObject {
        description: format!("{}, {}", concept.visual_metaphor, visual_style(level)),
        location: position_string(section),
        relationship: format!("illustrates the concept \"{}\"", concept.name),
        relative_size: relative_size(section),
        shape_and_color: format!(
            "rounded container filled {} with the subject tinted {}",
            container, tint
        ),
        texture: "smooth matte".to_string(),
        appearance_details: "self-contained panel, no text baked into the artwork".to_string(),
        orientation: "upright".to_string(),
    }
}

fn connector_object(section: &Section, scheme: &ColorScheme) -> FiboObject {
    FiboObject {
        description: "thin curved flow lines linking the concept panels top to bottom".to_string(),
        location: position_string(section),
        relationship: "guides the eye between concepts".to_string(),
        relative_size: relative_size(section),
        shape_and_color: format!("dashed curves in {}", scheme.accent),
        texture: "smooth".to_string(),
        appearance_details: "subtle, behind the panels".to_string(),
        orientation: "vertical".to_string(),
    }
}

fn diagram_object(
    concept: &Concept,
    section: &Section,
    scheme: &ColorScheme,
    level: KnowledgeLevel,
) -> FiboObject {
    FiboObject {
        description: format!(
            "schematic diagram of {}, {}",
            concept.visual_metaphor,
            visual_style(level)
        ),
        location: position_string(section),
        relationship: format!("diagrams the concept \"{}\"", concept.name),
        relative_size: relative_size(section),
        shape_and_color: format!("line diagram stroked in {}", scheme.secondary),
        texture: "paper-flat".to_string(),
        appearance_details: "axis labels and arrows allowed, no prose text".to_string(),
        orientation: "upright".to_string(),
    }
}

fn short_description(input: &GenerationInput) -> String {
    format!(
        "Educational explainer poster for \"{}\", {} audience, {} key concepts",
        input.summary.title,
        input.knowledge_level.as_str(),
        input.summary.key_concepts.len()
    )
}

fn background_setting(scheme: &ColorScheme) -> String {
    format!(
        "solid {} poster background with generous margins",
        scheme.background
    )
}

fn base_prompt(input: &GenerationInput, scheme: &ColorScheme) -> StructuredPrompt {
    let level = input.knowledge_level;
    StructuredPrompt {
        short_description: short_description(input),
        objects: Vec::new(),
        background_setting: background_setting(scheme),
        text_render: Vec::new(),
        lighting: lighting(level).to_string(),
        aesthetics: aesthetics(level).to_string(),
        photographic_characteristics: photographic(level).to_string(),
        style_medium: style_medium(level).to_string(),
        context: "science-communication explainer poster for a research paper".to_string(),
        artistic_style: artistic_style(level).to_string(),
    }
}

fn title_texts(
    input: &GenerationInput,
    section: &Section,
    scheme: &ColorScheme,
    typo: &Typography,
) -> Vec<TextElement> {
    let loc = position_string(section);
    vec![
        text_element(
            input.summary.title.clone(),
            loc.clone(),
            typo.title_pt,
            scheme.text,
            typo,
            "title",
        ),
        text_element(
            input.summary.one_liner.clone(),
            loc,
            typo.subtitle_pt,
            scheme.secondary,
            typo,
            "subtitle",
        ),
    ]
}

fn concept_texts(
    concept: &Concept,
    section: &Section,
    scheme: &ColorScheme,
    typo: &Typography,
) -> Vec<TextElement> {
    let loc = position_string(section);
    vec![
        text_element(
            concept.name.clone(),
            loc.clone(),
            typo.heading_pt,
            scheme.primary,
            typo,
            "concept heading",
        ),
        text_element(
            truncate(&concept.explanation, MAX_EXPLANATION_CHARS),
            loc,
            typo.body_pt,
            scheme.text,
            typo,
            "concept body",
        ),
    ]
}

fn footer_texts(
    input: &GenerationInput,
    section: &Section,
    scheme: &ColorScheme,
    typo: &Typography,
) -> Vec<TextElement> {
    let loc = position_string(section);
    vec![
        text_element(
            truncate(&input.summary.key_finding, MAX_KEY_FINDING_CHARS),
            loc.clone(),
            typo.callout_pt,
            scheme.accent,
            typo,
            "key-insight callout",
        ),
        text_element(
            format!("arXiv:{}", input.arxiv_id),
            loc,
            typo.caption_pt,
            scheme.secondary,
            typo,
            "citation caption",
        ),
    ]
}

/// Build the whole-poster prompt: one object per layout section in section
/// order, then text in the fixed order title, subtitle, per-concept
/// [heading, body], callout, caption.
pub fn build(input: &GenerationInput, layout: &LayoutStrategy) -> StructuredPrompt {
    let level = input.knowledge_level;
    let scheme = color_scheme(level);
    let typo = typography(level);
    let concepts = &input.summary.key_concepts;

    let mut prompt = base_prompt(input, &scheme);
    let mut concept_sections: Vec<&Section> = Vec::new();
    let mut header_section = None;
    let mut footer_section = None;

    let mut concept_idx = 0usize;
    for section in &layout.sections {
        let object = match section.content_type {
            ContentType::Header => {
                header_section = Some(section);
                banner_object(section, &scheme, level)
            }
            ContentType::Footer => {
                footer_section = Some(section);
                banner_object(section, &scheme, level)
            }
            // Concept and diagram sections have nothing to show when the
            // summary carries no concepts; skip them instead of panicking.
            ContentType::Concept => match concepts.get(concept_idx % concepts.len().max(1)) {
                Some(concept) => {
                    let obj = concept_object(concept, concept_idx, section, &scheme, level);
                    concept_sections.push(section);
                    concept_idx += 1;
                    obj
                }
                None => continue,
            },
            ContentType::Connector => connector_object(section, &scheme),
            ContentType::Diagram => {
                let paired = concept_idx.saturating_sub(1);
                match concepts.get(paired % concepts.len().max(1)) {
                    Some(concept) => diagram_object(concept, section, &scheme, level),
                    None => continue,
                }
            }
        };
        prompt.objects.push(object);
    }

    if let Some(section) = header_section {
        prompt
            .text_render
            .extend(title_texts(input, section, &scheme, &typo));
    }
    for (i, section) in concept_sections.iter().enumerate() {
        let concept = &concepts[i % concepts.len()];
        prompt
            .text_render
            .extend(concept_texts(concept, section, &scheme, &typo));
    }
    if let Some(section) = footer_section {
        prompt
            .text_render
            .extend(footer_texts(input, section, &scheme, &typo));
    }

    prompt
}

fn find_section(layout: &LayoutStrategy, content_type: ContentType) -> Option<&Section> {
    layout
        .sections
        .iter()
        .find(|s| s.content_type == content_type)
}

/// Modular header: the banner object plus title and subtitle overlays.
pub fn build_header_section(input: &GenerationInput, layout: &LayoutStrategy) -> StructuredPrompt {
    let level = input.knowledge_level;
    let scheme = color_scheme(level);
    let typo = typography(level);
    let section = find_section(layout, ContentType::Header);

    let mut prompt = base_prompt(input, &scheme);
    prompt.short_description = format!("Header banner: {}", short_description(input));
    if let Some(section) = section {
        prompt.objects.push(banner_object(section, &scheme, level));
        prompt
            .text_render
            .extend(title_texts(input, section, &scheme, &typo));
    }
    prompt
}

/// Modular concept panel for concept `index`. Independent of the other
/// sections; stands alone as a valid prompt.
pub fn build_concept_section(
    concept: &Concept,
    index: usize,
    level: KnowledgeLevel,
    layout: &LayoutStrategy,
) -> StructuredPrompt {
    let scheme = color_scheme(level);
    let typo = typography(level);
    let section = layout
        .sections
        .iter()
        .filter(|s| s.content_type == ContentType::Concept)
        .nth(index)
        .or_else(|| find_section(layout, ContentType::Concept));

    let mut prompt = StructuredPrompt {
        short_description: format!(
            "Concept panel {} of an explainer poster: {}",
            index + 1,
            concept.name
        ),
        objects: Vec::new(),
        background_setting: background_setting(&scheme),
        text_render: Vec::new(),
        lighting: lighting(level).to_string(),
        aesthetics: aesthetics(level).to_string(),
        photographic_characteristics: photographic(level).to_string(),
        style_medium: style_medium(level).to_string(),
        context: "one panel of a science-communication explainer poster".to_string(),
        artistic_style: artistic_style(level).to_string(),
    };
    if let Some(section) = section {
        prompt
            .objects
            .push(concept_object(concept, index, section, &scheme, level));
        prompt
            .text_render
            .extend(concept_texts(concept, section, &scheme, &typo));
    }
    prompt
}

/// Modular footer: banner object plus the key-insight callout and citation.
pub fn build_footer_section(input: &GenerationInput, layout: &LayoutStrategy) -> StructuredPrompt {
    let level = input.knowledge_level;
    let scheme = color_scheme(level);
    let typo = typography(level);
    let section = find_section(layout, ContentType::Footer);

    let mut prompt = base_prompt(input, &scheme);
    prompt.short_description = format!("Footer strip: {}", short_description(input));
    if let Some(section) = section {
        prompt.objects.push(banner_object(section, &scheme, level));
        prompt
            .text_render
            .extend(footer_texts(input, section, &scheme, &typo));
    }
    prompt
}
