use dreamteam::config::ScoringConfig;
use dreamteam::model::{GrantRole, SparseVector};
use dreamteam::scoring::score_pair;
use dreamteam::test_utils::fixtures::{ResearcherBuilder, required_skill, specialist};

const NOW: i32 = 2026;

#[test]
fn perfect_conceptual_match_without_sparse() {
    // One current-year publication whose embedding equals the skill's,
    // no sparse vectors anywhere: conceptual saturates, structured is 0,
    // and the 0.7/0.3 blend puts the score at 30.
    let config = ScoringConfig::default();
    let researcher = specialist("r1", NOW, vec![0.6, 0.8]);
    let skill = required_skill("signal processing", vec![0.6, 0.8]);

    let cell = score_pair(&researcher, &skill, NOW, &config).unwrap();
    assert!((cell.conceptual - 1.0).abs() < 1e-9);
    assert_eq!(cell.structured, 0.0);
    assert!((cell.score - 30.0).abs() < 1e-6);
    assert_eq!(cell.evidence_publication_id.as_deref(), Some("r1-p1"));
}

#[test]
fn score_scales_with_grant_factor() {
    let config = ScoringConfig::default();
    let researcher = ResearcherBuilder::new("r1")
        .publication("r1-p1", NOW, vec![1.0, 0.0])
        .grant("award-1", NOW, GrantRole::Pi)
        .build();
    let skill = required_skill("target", vec![1.0, 0.0]);

    let cell = score_pair(&researcher, &skill, NOW, &config).unwrap();
    let expected = 30.0 * (1.0 + 2.0_f64.ln());
    assert!((cell.score - expected).abs() < 1e-6);
}

#[test]
fn sparse_overlap_raises_the_blend() {
    let config = ScoringConfig::default();
    let researcher = ResearcherBuilder::new("r1")
        .publication_with_terms(
            "r1-p1",
            NOW,
            vec![1.0, 0.0],
            &["photonic", "waveguide", "fabrication"],
        )
        .build();
    let mut skill = required_skill("photonic waveguide design", vec![1.0, 0.0]);
    skill.sparse = Some(SparseVector::from_terms(["photonic", "waveguide", "design"]));

    let cell = score_pair(&researcher, &skill, NOW, &config).unwrap();
    assert!(cell.structured > 0.0);
    assert!(cell.score > 30.0);
}

#[test]
fn missing_skill_sparse_never_raises() {
    let config = ScoringConfig::default();
    let researcher = ResearcherBuilder::new("r1")
        .publication_with_terms("r1-p1", NOW, vec![1.0, 0.0], &["photonic"])
        .build();
    let skill = required_skill("photonic design", vec![1.0, 0.0]);

    let cell = score_pair(&researcher, &skill, NOW, &config).unwrap();
    assert_eq!(cell.structured, 0.0);
}

#[test]
fn no_publications_means_zero_conceptual() {
    let config = ScoringConfig::default();
    let researcher = ResearcherBuilder::new("r1").build();
    let skill = required_skill("anything", vec![1.0, 0.0]);

    let cell = score_pair(&researcher, &skill, NOW, &config).unwrap();
    assert_eq!(cell.score, 0.0);
    assert!(cell.evidence_publication_id.is_none());
}

#[test]
fn old_work_decays_toward_zero() {
    let config = ScoringConfig::default();
    let veteran = specialist("r1", NOW - 20, vec![1.0, 0.0]);
    let skill = required_skill("target", vec![1.0, 0.0]);

    let cell = score_pair(&veteran, &skill, NOW, &config).unwrap();
    assert_eq!(cell.conceptual, 0.0);
    assert_eq!(cell.score, 0.0);
}

#[test]
fn density_bonus_rewards_breadth() {
    let mut config = ScoringConfig::default();
    config.alpha = 0.0; // isolate the conceptual component
    config.density_bonus_cap = 2.0; // give the log term room to differ

    // Moderate similarity (0.3) so the bonus is visible before the
    // conceptual component saturates at 1.
    let moderate = vec![0.3, 0.953_939_2];
    let shallow = ResearcherBuilder::new("shallow")
        .publication("s-p1", NOW, moderate.clone())
        .build();
    let broad = ResearcherBuilder::new("broad")
        .publication("b-p1", NOW, moderate.clone())
        .publication("b-p2", NOW, moderate.clone())
        .publication("b-p3", NOW, moderate)
        .build();
    let skill = required_skill("target", vec![1.0, 0.0]);

    let shallow_cell = score_pair(&shallow, &skill, NOW, &config).unwrap();
    let broad_cell = score_pair(&broad, &skill, NOW, &config).unwrap();
    assert!(broad_cell.conceptual > shallow_cell.conceptual);
    assert!(broad_cell.conceptual <= 1.0);
}

#[test]
fn density_bonus_stays_within_default_cap() {
    let mut config = ScoringConfig::default();
    config.alpha = 0.0;

    let broad = ResearcherBuilder::new("broad")
        .publication("b-p1", NOW, vec![0.6, 0.8])
        .publication("b-p2", NOW, vec![0.6, 0.8])
        .publication("b-p3", NOW, vec![0.6, 0.8])
        .build();
    let skill = required_skill("target", vec![1.0, 0.0]);

    let cell = score_pair(&broad, &skill, NOW, &config).unwrap();
    // Peak is 0.6; the bonus cannot exceed the configured cap.
    assert!(cell.conceptual <= 0.6 + config.density_bonus_cap + 1e-6);
}

#[test]
fn dimension_mismatch_is_an_error() {
    let config = ScoringConfig::default();
    let researcher = specialist("r1", NOW, vec![1.0, 0.0, 0.0]);
    let skill = required_skill("target", vec![1.0, 0.0]);

    let err = score_pair(&researcher, &skill, NOW, &config).unwrap_err();
    assert_eq!(err.code(), "data_integrity");
}
