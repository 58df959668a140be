//! End-to-end engine runs over synthetic corpora.

use dreamteam::assembly::{AssemblyRequest, SkillWeighting, Strategy};
use dreamteam::config::EngineConfig;
use dreamteam::eligibility::{EligibilityRules, ExclusionReason};
use dreamteam::engine::MatchEngine;
use dreamteam::model::{GrantRole, ResearcherProfile, SkillDescriptor};
use dreamteam::test_utils::fixtures::{
    ResearcherBuilder, basis, preferred_skill, required_skill, specialist,
};

const NOW: i32 = 2026;

fn request(min: usize, max: usize, strategy: Strategy) -> AssemblyRequest {
    AssemblyRequest {
        min_team_size: min,
        max_team_size: max,
        strategy,
        skill_weighting: SkillWeighting::default(),
    }
}

fn three_axis_corpus() -> (Vec<ResearcherProfile>, Vec<SkillDescriptor>) {
    let researchers = vec![
        specialist("ra", NOW, basis(3, 0)),
        specialist("rb", NOW, basis(3, 1)),
        specialist("rc", NOW, basis(3, 2)),
    ];
    let skills = vec![
        required_skill("axis a", basis(3, 0)),
        required_skill("axis b", basis(3, 1)),
        required_skill("axis c", basis(3, 2)),
    ];
    (researchers, skills)
}

#[test]
fn pool_of_one_with_min_two_is_partial_not_error() {
    let engine = MatchEngine::default();
    let researchers = vec![specialist("only", NOW, basis(2, 0))];
    let skills = vec![required_skill("axis a", basis(2, 0))];

    let outcome = engine
        .run(
            &researchers,
            &skills,
            &EligibilityRules::default(),
            &[request(2, 4, Strategy::Greedy)],
            NOW,
        )
        .expect("partial coverage must not surface as an error");

    let team = &outcome.reports[0].outcome.team;
    assert!(team.partial_coverage);
    assert_eq!(team.members.len(), 1);
}

#[test]
fn eligibility_exclusions_flow_into_outcome() {
    let engine = MatchEngine::default();
    let researchers = vec![
        ResearcherBuilder::new("junior")
            .publication("j-p1", 2020, basis(2, 0))
            .build(),
        ResearcherBuilder::new("veteran")
            .publication("v-p1", 2001, basis(2, 0))
            .publication("v-p2", NOW, basis(2, 0))
            .build(),
    ];
    let skills = vec![required_skill("axis a", basis(2, 0))];
    let rules = EligibilityRules {
        early_career_since: Some(2015),
        ..Default::default()
    };

    let outcome = engine
        .run(
            &researchers,
            &skills,
            &rules,
            &[request(1, 2, Strategy::Greedy)],
            NOW,
        )
        .unwrap();

    assert_eq!(outcome.matrix.rows.len(), 1);
    assert_eq!(outcome.excluded.len(), 1);
    assert_eq!(outcome.excluded[0].researcher_id, "veteran");
    assert_eq!(outcome.excluded[0].reasons, vec![ExclusionReason::CareerStage]);
    // The excluded veteran never appears on the team.
    let team = &outcome.reports[0].outcome.team;
    assert!(team.members.iter().all(|m| m.researcher_id != "veteran"));
}

#[test]
fn multi_strategy_comparison_over_one_matrix() {
    let engine = MatchEngine::default();
    let (researchers, skills) = three_axis_corpus();
    let requests: Vec<AssemblyRequest> = Strategy::ALL
        .into_iter()
        .map(|strategy| request(1, 3, strategy))
        .collect();

    let outcome = engine
        .run(
            &researchers,
            &skills,
            &EligibilityRules::default(),
            &requests,
            NOW,
        )
        .unwrap();

    assert_eq!(outcome.reports.len(), 3);
    for report in &outcome.reports {
        let team = &report.outcome.team;
        assert!(!team.partial_coverage);
        assert!((1..=3).contains(&team.members.len()));
        // No duplicate members.
        let mut ids: Vec<&str> = team.members.iter().map(|m| m.researcher_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), team.members.len());
    }
    // With three orthogonal specialists every strategy converges on the
    // same full roster.
    for report in &outcome.reports {
        assert_eq!(report.outcome.team.members.len(), 3);
    }
}

#[test]
fn degraded_rows_do_not_poison_the_run() {
    let engine = MatchEngine::default();
    let mut researchers = vec![
        specialist("good", NOW, basis(2, 0)),
        specialist("partner", NOW, basis(2, 1)),
    ];
    // Wrong embedding dimension: every cell for this row degrades.
    researchers.push(specialist("broken", NOW, basis(5, 0)));
    let skills = vec![
        required_skill("axis a", basis(2, 0)),
        required_skill("axis b", basis(2, 1)),
    ];

    let outcome = engine
        .run(
            &researchers,
            &skills,
            &EligibilityRules::default(),
            &[request(1, 2, Strategy::Greedy)],
            NOW,
        )
        .unwrap();

    let broken_row = outcome
        .matrix
        .rows
        .iter()
        .position(|r| r.researcher_id == "broken")
        .unwrap();
    assert!(outcome.matrix.cells[broken_row].iter().all(|c| c.degraded));
    assert!(outcome.matrix.cells[broken_row].iter().all(|c| c.score == 0.0));

    let team = &outcome.reports[0].outcome.team;
    let ids: Vec<&str> = team.members.iter().map(|m| m.researcher_id.as_str()).collect();
    assert!(ids.contains(&"good") && ids.contains(&"partner"));
}

#[test]
fn preferred_skills_stay_out_of_aggregate_by_default() {
    let engine = MatchEngine::default();
    let researchers = vec![
        specialist("req-spec", NOW, basis(2, 0)),
        specialist("pref-spec", NOW, basis(2, 1)),
    ];
    let skills = vec![
        required_skill("must have", basis(2, 0)),
        preferred_skill("nice to have", basis(2, 1)),
    ];

    let outcome = engine
        .run(
            &researchers,
            &skills,
            &EligibilityRules::default(),
            &[request(1, 1, Strategy::Greedy)],
            NOW,
        )
        .unwrap();

    let report = &outcome.reports[0];
    let team = &report.outcome.team;
    // Only the required skill drives selection.
    assert_eq!(team.members[0].researcher_id, "req-spec");
    let coverage = &report.outcome.coverage;
    assert_eq!(coverage.required.len(), 1);
    assert_eq!(coverage.preferred.len(), 1);
    assert!((coverage.aggregate - coverage.required[0].achieved).abs() < 1e-12);
}

#[test]
fn grant_history_breaks_otherwise_equal_candidates() {
    let engine = MatchEngine::default();
    let funded = ResearcherBuilder::new("funded")
        .publication("f-p1", NOW, basis(2, 0))
        .grant("award", NOW, GrantRole::Pi)
        .build();
    let unfunded = specialist("unfunded", NOW, basis(2, 0));
    let researchers = vec![unfunded, funded];
    let skills = vec![required_skill("axis a", basis(2, 0))];

    let outcome = engine
        .run(
            &researchers,
            &skills,
            &EligibilityRules::default(),
            &[request(1, 1, Strategy::Greedy)],
            NOW,
        )
        .unwrap();

    assert_eq!(
        outcome.reports[0].outcome.team.members[0].researcher_id,
        "funded"
    );
    assert_eq!(outcome.ranking[0].researcher_id, "funded");
}

#[test]
fn outcome_serializes_round_trip() {
    let engine = MatchEngine::default();
    let (researchers, skills) = three_axis_corpus();

    let outcome = engine
        .run(
            &researchers,
            &skills,
            &EligibilityRules::default(),
            &[request(1, 3, Strategy::Greedy)],
            NOW,
        )
        .unwrap();

    let json = serde_json::to_string(&outcome).unwrap();
    let parsed: dreamteam::engine::MatchOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.matrix.rows.len(), outcome.matrix.rows.len());
    assert_eq!(parsed.reports.len(), 1);
    assert_eq!(parsed.ranking.len(), 3);
}

#[test]
fn bad_strategy_bounds_fail_before_work() {
    let engine = MatchEngine::default();
    let (researchers, skills) = three_axis_corpus();
    let bad = AssemblyRequest {
        min_team_size: 5,
        max_team_size: 2,
        strategy: Strategy::Greedy,
        skill_weighting: SkillWeighting::default(),
    };

    let err = engine
        .run(
            &researchers,
            &skills,
            &EligibilityRules::default(),
            &[bad],
            NOW,
        )
        .unwrap_err();
    assert_eq!(err.code(), "configuration");
}

#[test]
fn engine_config_load_respects_defaults() {
    let config = EngineConfig::default();
    let engine = MatchEngine::new(config);
    assert!((engine.config().scoring.alpha - 0.7).abs() < f64::EPSILON);
}
