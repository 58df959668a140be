//! Assembly behavior over hand-built matrices with exact scores.

use dreamteam::assembly::{
    AssemblyRequest, SkillWeighting, Strategy, TeamAssembler, TeamRole, evaluate,
};
use dreamteam::config::AssemblyConfig;
use dreamteam::model::SkillImportance;
use dreamteam::scoring::{AffinityCell, AffinityMatrix, MatrixColumn, MatrixRow};

fn cell(score: f64) -> AffinityCell {
    AffinityCell {
        score,
        structured: 0.0,
        conceptual: score / 100.0,
        evidence_publication_id: None,
        degraded: false,
    }
}

/// Row-major matrix from literal scores.
fn matrix(names: &[&str], skills: &[&str], scores: &[&[f64]]) -> AffinityMatrix {
    let rows = names
        .iter()
        .map(|id| MatrixRow {
            researcher_id: (*id).to_string(),
            researcher_name: id.to_uppercase(),
        })
        .collect();
    let columns = skills
        .iter()
        .map(|skill| MatrixColumn {
            skill: (*skill).to_string(),
            importance: SkillImportance::Required,
        })
        .collect();
    let cells = scores
        .iter()
        .flat_map(|row| row.iter().copied().map(cell))
        .collect();
    AffinityMatrix::from_parts(rows, columns, cells).unwrap()
}

fn request(min: usize, max: usize, strategy: Strategy) -> AssemblyRequest {
    AssemblyRequest {
        min_team_size: min,
        max_team_size: max,
        strategy,
        skill_weighting: SkillWeighting::default(),
    }
}

/// Three orthogonal specialists must all be selected.
#[test]
fn greedy_selects_complementary_specialists() {
    let m = matrix(
        &["x", "y", "z"],
        &["a", "b", "c"],
        &[
            &[90.0, 10.0, 10.0],
            &[10.0, 90.0, 10.0],
            &[10.0, 10.0, 90.0],
        ],
    );
    let config = AssemblyConfig::default();
    let outcome = TeamAssembler::new(&m, &config)
        .assemble(&request(1, 3, Strategy::Greedy))
        .unwrap();

    let mut ids: Vec<&str> = outcome
        .team
        .members
        .iter()
        .map(|member| member.researcher_id.as_str())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["x", "y", "z"]);
    assert!((outcome.coverage.aggregate - 90.0).abs() < 1e-9);
}

/// A strong generalist should not crowd out the specialists the
/// remaining skills need.
#[test]
fn greedy_prefers_marginal_gain_over_raw_strength() {
    let m = matrix(
        &["generalist", "spec-a", "spec-b"],
        &["a", "b"],
        &[&[70.0, 70.0], &[95.0, 0.0], &[0.0, 95.0]],
    );
    let config = AssemblyConfig::default();
    let outcome = TeamAssembler::new(&m, &config)
        .assemble(&request(1, 2, Strategy::Greedy))
        .unwrap();

    // Generalist first (mean 70 beats any single 47.5 gain), then the
    // pair of specialists can only add 25 each; one of them joins.
    assert_eq!(outcome.team.members[0].researcher_id, "generalist");
    assert_eq!(outcome.team.members.len(), 2);
    assert!(outcome.coverage.aggregate > 70.0);
}

/// Ties resolve by mean affinity, then lexicographic id.
#[test]
fn greedy_tie_breaks_are_deterministic() {
    let m = matrix(
        &["beta", "alpha"],
        &["a"],
        &[&[50.0], &[50.0]],
    );
    let config = AssemblyConfig::default();
    let outcome = TeamAssembler::new(&m, &config)
        .assemble(&request(1, 1, Strategy::Greedy))
        .unwrap();
    assert_eq!(outcome.team.members[0].researcher_id, "alpha");
}

/// Undersized pools finish with a flagged team, not an error.
#[test]
fn undersized_pool_flags_partial_coverage() {
    let m = matrix(&["only"], &["a", "b"], &[&[80.0, 40.0]]);
    let config = AssemblyConfig::default();
    let outcome = TeamAssembler::new(&m, &config)
        .assemble(&request(2, 5, Strategy::Greedy))
        .unwrap();

    assert!(outcome.team.partial_coverage);
    assert_eq!(outcome.team.members.len(), 1);
    assert_eq!(outcome.team.members[0].role, TeamRole::Lead);
}

/// Greedy and topk over one matrix each satisfy the size constraints
/// and produce independently valid coverage reports.
#[test]
fn strategies_compare_over_shared_matrix() {
    let m = matrix(
        &["r1", "r2", "r3", "r4"],
        &["a", "b", "c"],
        &[
            &[80.0, 30.0, 20.0],
            &[20.0, 85.0, 25.0],
            &[30.0, 20.0, 75.0],
            &[60.0, 60.0, 60.0],
        ],
    );
    let config = AssemblyConfig::default();
    let assembler = TeamAssembler::new(&m, &config);

    for strategy in [Strategy::Greedy, Strategy::Topk] {
        let outcome = assembler.assemble(&request(2, 3, strategy)).unwrap();
        let size = outcome.team.members.len();
        assert!((2..=3).contains(&size), "{strategy}: size {size}");
        assert!(!outcome.team.partial_coverage);

        // The reported coverage must match an independent evaluation.
        let rows: Vec<usize> = outcome
            .team
            .members
            .iter()
            .map(|member| m.row_index(&member.researcher_id).unwrap())
            .collect();
        let check = evaluate(&rows, &m);
        assert!((check.aggregate - outcome.coverage.aggregate).abs() < 1e-9);
    }
}

/// Topk gives every required skill its top scorer before refilling.
#[test]
fn topk_picks_column_champions() {
    let m = matrix(
        &["a-champ", "b-champ", "filler"],
        &["a", "b"],
        &[&[90.0, 10.0], &[10.0, 90.0], &[50.0, 50.0]],
    );
    let config = AssemblyConfig::default();
    let outcome = TeamAssembler::new(&m, &config)
        .assemble(&request(1, 2, Strategy::Topk))
        .unwrap();

    let ids: Vec<&str> = outcome
        .team
        .members
        .iter()
        .map(|member| member.researcher_id.as_str())
        .collect();
    assert_eq!(ids, vec!["a-champ", "b-champ"]);
}

/// Hybrid seeds the scarcest skill first.
#[test]
fn hybrid_seeds_scarce_skill_first() {
    // Skill "rare" has no strong scorers; "common" has three.
    let m = matrix(
        &["r1", "r2", "r3"],
        &["common", "rare"],
        &[&[90.0, 10.0], &[85.0, 20.0], &[80.0, 55.0]],
    );
    let config = AssemblyConfig::default();
    let outcome = TeamAssembler::new(&m, &config)
        .assemble(&request(1, 2, Strategy::Hybrid))
        .unwrap();

    // r3 is the best scorer on the scarce skill and must be seeded
    // before greedy fills the rest.
    assert_eq!(outcome.team.members[0].researcher_id, "r3");
    assert_eq!(outcome.team.members.len(), 2);
}

/// The epsilon stop keeps redundant members off a satisfied team.
#[test]
fn greedy_stops_when_gain_dries_up() {
    let m = matrix(
        &["ace", "clone1", "clone2"],
        &["a", "b"],
        &[&[90.0, 90.0], &[90.0, 90.0], &[90.0, 90.0]],
    );
    let config = AssemblyConfig::default();
    let outcome = TeamAssembler::new(&m, &config)
        .assemble(&request(1, 3, Strategy::Greedy))
        .unwrap();

    // After the first pick the clones add nothing.
    assert_eq!(outcome.team.members.len(), 1);
    assert_eq!(outcome.team.members[0].researcher_id, "ace");
    assert!((outcome.coverage.aggregate - 90.0).abs() < 1e-9);
}

/// Zero-gain members are still added while the team is undersized.
#[test]
fn minimum_size_outranks_epsilon_stop() {
    let m = matrix(
        &["ace", "clone"],
        &["a"],
        &[&[90.0], &[90.0]],
    );
    let config = AssemblyConfig::default();
    let outcome = TeamAssembler::new(&m, &config)
        .assemble(&request(2, 3, Strategy::Greedy))
        .unwrap();

    assert_eq!(outcome.team.members.len(), 2);
    assert!(!outcome.team.partial_coverage);
}
