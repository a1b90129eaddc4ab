//! Property-style coverage for the layout engine across every knowledge
//! level and the full geometric concept range.

use poster_engine::layout::{
    ContentType, LayoutType, calculate_layout, position_string, recommendations, validate_layout,
};
use poster_engine::models::KnowledgeLevel;

const LEVELS: [KnowledgeLevel; 3] = [
    KnowledgeLevel::Beginner,
    KnowledgeLevel::Intermediate,
    KnowledgeLevel::Advanced,
];

fn no_tags() -> Vec<String> {
    vec![]
}

#[test]
fn every_in_range_layout_is_well_formed() {
    for level in LEVELS {
        for n in 1..=10 {
            let layout = calculate_layout(n, level, &no_tags())
                .unwrap_or_else(|e| panic!("{:?} n={} raised: {}", level, n, e));

            assert!(!layout.sections.is_empty());
            assert_eq!(
                layout.sections.first().unwrap().content_type,
                ContentType::Header,
                "{:?} n={} must start with a header",
                level,
                n
            );
            assert_eq!(
                layout.sections.last().unwrap().content_type,
                ContentType::Footer,
                "{:?} n={} must end with a footer",
                level,
                n
            );
            assert_eq!(
                layout
                    .sections
                    .iter()
                    .filter(|s| s.content_type == ContentType::Header)
                    .count(),
                1
            );
            assert_eq!(
                layout
                    .sections
                    .iter()
                    .filter(|s| s.content_type == ContentType::Footer)
                    .count(),
                1
            );

            // Overlay sections share vertical space with the bands they
            // annotate and sit outside the height budget.
            let height_sum: f32 = layout
                .sections
                .iter()
                .filter(|s| !s.content_type.is_overlay())
                .map(|s| s.height_percentage)
                .sum();
            assert!(
                (height_sum - 100.0).abs() <= 5.0,
                "{:?} n={} heights sum to {}",
                level,
                n,
                height_sum
            );

            assert!(validate_layout(&layout).valid);
        }
    }
}

#[test]
fn out_of_range_counts_are_rejected_not_clamped() {
    for level in LEVELS {
        assert!(calculate_layout(0, level, &no_tags()).is_err());
        assert!(calculate_layout(11, level, &no_tags()).is_err());
    }
}

#[test]
fn strategy_selection_is_fixed_per_level() {
    for n in 1..=10 {
        assert_eq!(
            calculate_layout(n, KnowledgeLevel::Beginner, &no_tags())
                .unwrap()
                .layout_type,
            LayoutType::VerticalFlow
        );
        let expected = if n <= 4 {
            LayoutType::Grid
        } else {
            LayoutType::FPattern
        };
        assert_eq!(
            calculate_layout(n, KnowledgeLevel::Intermediate, &no_tags())
                .unwrap()
                .layout_type,
            expected
        );
        assert_eq!(
            calculate_layout(n, KnowledgeLevel::Advanced, &no_tags())
                .unwrap()
                .layout_type,
            LayoutType::Academic
        );
    }
}

#[test]
fn beginner_concepts_share_the_body_evenly() {
    let layout = calculate_layout(5, KnowledgeLevel::Beginner, &no_tags()).unwrap();
    let bands: Vec<_> = layout
        .sections
        .iter()
        .filter(|s| s.content_type == ContentType::Concept)
        .collect();
    assert_eq!(bands.len(), 5);
    for band in &bands {
        assert!((band.height_percentage - 15.0).abs() < 0.01);
    }
}

#[test]
fn f_pattern_leads_with_a_full_width_band() {
    let layout = calculate_layout(6, KnowledgeLevel::Intermediate, &no_tags()).unwrap();
    let concepts: Vec<_> = layout
        .sections
        .iter()
        .filter(|s| s.content_type == ContentType::Concept)
        .collect();
    assert_eq!(concepts.len(), 6);
    // Lead band takes a quarter of the 72% body
    assert!((concepts[0].height_percentage - 18.0).abs() < 0.01);
    assert_eq!(concepts[0].position.x, "center");
    // The rest tile two columns
    assert_eq!(concepts[1].position.x, "0%");
    assert_eq!(concepts[2].position.x, "50%");
}

#[test]
fn advanced_diagram_branch_requires_tags_and_four_concepts() {
    let tags = vec!["visual".to_string()];
    let with = calculate_layout(4, KnowledgeLevel::Advanced, &tags).unwrap();
    assert_eq!(
        with.sections
            .iter()
            .filter(|s| s.content_type == ContentType::Diagram)
            .count(),
        4
    );

    let too_few = calculate_layout(3, KnowledgeLevel::Advanced, &tags).unwrap();
    assert!(
        !too_few
            .sections
            .iter()
            .any(|s| s.content_type == ContentType::Diagram)
    );

    let untagged = calculate_layout(5, KnowledgeLevel::Advanced, &no_tags()).unwrap();
    assert!(
        !untagged
            .sections
            .iter()
            .any(|s| s.content_type == ContentType::Diagram)
    );
}

#[test]
fn recommendations_are_advisory_and_level_driven() {
    let rec = recommendations(3, KnowledgeLevel::Beginner, &no_tags());
    assert_eq!(rec.recommended, LayoutType::VerticalFlow);
    assert_eq!(rec.alternatives.len(), 3);
    assert!(!rec.reasoning.is_empty());

    let rec = recommendations(6, KnowledgeLevel::Intermediate, &no_tags());
    assert_eq!(rec.recommended, LayoutType::FPattern);
}

#[test]
fn position_anchors_cover_the_whole_poster() {
    let layout = calculate_layout(3, KnowledgeLevel::Beginner, &no_tags()).unwrap();
    assert_eq!(position_string(layout.sections.first().unwrap()), "top center");
    assert_eq!(
        position_string(layout.sections.last().unwrap()),
        "bottom center"
    );
}
