//! Builder and validator behavior on realistic summaries

use poster_engine::layout::{ContentType, calculate_layout};
use poster_engine::models::{
    Concept, GenerationInput, KnowledgeLevel, Summary, validate_generation_input,
};
use poster_engine::prompt::{
    build, build_concept_section, build_footer_section, build_header_section,
    validate_structured_prompt,
};

fn concept(name: &str, explanation: &str) -> Concept {
    Concept {
        name: name.to_string(),
        explanation: explanation.to_string(),
        visual_metaphor: format!("a diagram of {}", name),
    }
}

fn input(level: KnowledgeLevel, n_concepts: usize) -> GenerationInput {
    GenerationInput {
        summary: Summary {
            title: "Attention Is All You Need".to_string(),
            one_liner: "Transformers replace recurrence with attention".to_string(),
            key_concepts: (0..n_concepts)
                .map(|i| concept(&format!("Concept {}", i), "Queries match keys to mix values."))
                .collect(),
            key_finding: "Attention alone matches recurrent models at lower cost".to_string(),
            real_world_impact: None,
        },
        knowledge_level: level,
        tags: vec!["machine-learning".to_string()],
        arxiv_id: "1706.03762".to_string(),
        user_preferences: None,
        options: None,
    }
}

fn layout_for(input: &GenerationInput) -> poster_engine::layout::LayoutStrategy {
    calculate_layout(
        input.summary.key_concepts.len(),
        input.knowledge_level,
        &input.tags,
    )
    .unwrap()
}

#[test]
fn built_prompt_passes_validation() {
    for level in [
        KnowledgeLevel::Beginner,
        KnowledgeLevel::Intermediate,
        KnowledgeLevel::Advanced,
    ] {
        let input = input(level, 3);
        let layout = layout_for(&input);
        let prompt = build(&input, &layout);
        let report = validate_structured_prompt(&prompt);
        assert!(report.valid, "{:?}: {:?}", level, report.errors);
    }
}

#[test]
fn one_object_per_layout_section_in_order() {
    let input = input(KnowledgeLevel::Beginner, 4);
    let layout = layout_for(&input);
    let prompt = build(&input, &layout);
    assert_eq!(prompt.objects.len(), layout.sections.len());
    // Section order carries through: first object is the header band,
    // last is the footer band.
    assert_eq!(layout.sections[0].content_type, ContentType::Header);
    assert!(prompt.objects[0].description.contains("banner"));
    assert!(prompt.objects.last().unwrap().description.contains("banner"));
}

#[test]
fn text_render_order_is_fixed() {
    let input = input(KnowledgeLevel::Intermediate, 2);
    let layout = layout_for(&input);
    let prompt = build(&input, &layout);

    // title, subtitle, [heading, body] x2, callout, caption
    assert_eq!(prompt.text_render.len(), 8);
    assert_eq!(prompt.text_render[0].text, input.summary.title);
    assert_eq!(prompt.text_render[1].text, input.summary.one_liner);
    assert_eq!(prompt.text_render[2].text, "Concept 0");
    assert_eq!(prompt.text_render[4].text, "Concept 1");
    assert_eq!(prompt.text_render[6].text, input.summary.key_finding);
    assert_eq!(prompt.text_render[7].text, "arXiv:1706.03762");
}

#[test]
fn every_text_element_is_marked_overlay_with_role_size() {
    let input = input(KnowledgeLevel::Advanced, 3);
    let layout = layout_for(&input);
    let prompt = build(&input, &layout);
    for element in &prompt.text_render {
        assert!(element.appearance_details.contains("overlay"));
        assert!(element.appearance_details.contains("never diffusion-generated"));
        assert!(element.appearance_details.contains("pt equivalent"));
    }
    assert_eq!(prompt.text_render[0].size, "72pt");
    assert_eq!(prompt.text_render[1].size, "24pt");
    assert_eq!(prompt.text_render[2].size, "28pt");
    assert_eq!(prompt.text_render[3].size, "16pt");
}

#[test]
fn long_explanations_truncate_at_150_with_ellipsis() {
    let mut input = input(KnowledgeLevel::Beginner, 1);
    input.summary.key_concepts[0].explanation = "e".repeat(300);
    let layout = layout_for(&input);
    let prompt = build_concept_section(
        &input.summary.key_concepts[0],
        0,
        input.knowledge_level,
        &layout,
    );
    let body = &prompt.text_render[1].text;
    assert_eq!(body.chars().count(), 150);
    assert!(body.ends_with("..."));
    assert_eq!(&body[..147], "e".repeat(147).as_str());

    // At the boundary, nothing is cut
    input.summary.key_concepts[0].explanation = "e".repeat(150);
    let prompt = build_concept_section(
        &input.summary.key_concepts[0],
        0,
        input.knowledge_level,
        &layout,
    );
    assert_eq!(prompt.text_render[1].text.chars().count(), 150);
    assert!(!prompt.text_render[1].text.ends_with("..."));
}

#[test]
fn key_finding_truncates_at_100_for_the_callout() {
    let mut input = input(KnowledgeLevel::Intermediate, 2);
    input.summary.key_finding = "f".repeat(250);
    let layout = layout_for(&input);
    let prompt = build_footer_section(&input, &layout);
    let callout = &prompt.text_render[0].text;
    assert_eq!(callout.chars().count(), 100);
    assert!(callout.ends_with("..."));
}

#[test]
fn builder_is_deterministic() {
    let input = input(KnowledgeLevel::Advanced, 5);
    let layout = layout_for(&input);
    assert_eq!(build(&input, &layout), build(&input, &layout));
    assert_eq!(
        build_header_section(&input, &layout),
        build_header_section(&input, &layout)
    );
}

#[test]
fn modular_sections_stand_alone_as_valid_prompts() {
    let input = input(KnowledgeLevel::Beginner, 3);
    let layout = layout_for(&input);

    assert!(validate_structured_prompt(&build_header_section(&input, &layout)).valid);
    for (i, concept) in input.summary.key_concepts.iter().enumerate() {
        let panel = build_concept_section(concept, i, input.knowledge_level, &layout);
        assert!(validate_structured_prompt(&panel).valid);
        assert_eq!(panel.objects.len(), 1);
        assert_eq!(panel.text_render.len(), 2);
    }
    assert!(validate_structured_prompt(&build_footer_section(&input, &layout)).valid);
}

#[test]
fn concept_containers_cycle_four_swatches() {
    let input = input(KnowledgeLevel::Beginner, 5);
    let layout = layout_for(&input);
    let first = build_concept_section(
        &input.summary.key_concepts[0],
        0,
        input.knowledge_level,
        &layout,
    );
    let fifth = build_concept_section(
        &input.summary.key_concepts[4],
        4,
        input.knowledge_level,
        &layout,
    );
    let second = build_concept_section(
        &input.summary.key_concepts[1],
        1,
        input.knowledge_level,
        &layout,
    );
    // index 4 wraps back to the container swatch of index 0 (4 % 4 == 0)
    // while index 1 gets a different one
    let swatch = |p: &poster_engine::prompt::StructuredPrompt| {
        p.objects[0]
            .shape_and_color
            .split("filled ")
            .nth(1)
            .unwrap()
            .split(' ')
            .next()
            .unwrap()
            .to_string()
    };
    assert_eq!(swatch(&first), swatch(&fifth));
    assert_ne!(swatch(&first), swatch(&second));
}

#[test]
fn build_skips_concept_sections_when_the_summary_has_none() {
    // `build` is pure and public; it must tolerate a layout computed for a
    // different concept count, including a summary with none at all.
    let full = input(KnowledgeLevel::Beginner, 3);
    let layout = layout_for(&full);
    let mut bare = full.clone();
    bare.summary.key_concepts.clear();

    let prompt = build(&bare, &layout);

    // Header banner, connector overlay and footer banner survive; the three
    // concept sections produce nothing.
    assert_eq!(prompt.objects.len(), 3);
    assert!(prompt.objects.iter().all(|o| !o.description.is_empty()));
    // Text order collapses to title, subtitle, callout, caption
    assert_eq!(prompt.text_render.len(), 4);
    assert_eq!(prompt.text_render[0].text, bare.summary.title);
    assert_eq!(prompt.text_render[3].text, "arXiv:1706.03762");
}

#[test]
fn input_validation_enforces_the_semantic_bound() {
    assert!(validate_generation_input(&input(KnowledgeLevel::Beginner, 6)).is_ok());
    assert!(validate_generation_input(&input(KnowledgeLevel::Beginner, 7)).is_err());
}
