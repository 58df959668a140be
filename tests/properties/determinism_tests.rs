use proptest::prelude::*;

use dreamteam::assembly::{
    AssemblyRequest, SelectionDecision, SkillWeighting, Strategy, TeamAssembler,
};
use dreamteam::config::{AssemblyConfig, ScoringConfig};
use dreamteam::model::ResearcherProfile;
use dreamteam::scoring::build_matrix;
use dreamteam::test_utils::fixtures::{required_skill, specialist};

fn pool(embeddings: &[(f32, f32)]) -> Vec<ResearcherProfile> {
    embeddings
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| specialist(&format!("r{i:02}"), 2024, vec![x, y]))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matrix_build_is_deterministic(
        embeddings in proptest::collection::vec((-1.0f32..1.0, -1.0f32..1.0), 1..12),
        skill_axes in proptest::collection::vec((-1.0f32..1.0, -1.0f32..1.0), 1..5),
    ) {
        let config = ScoringConfig::default();
        let researchers = pool(&embeddings);
        let eligible: Vec<&ResearcherProfile> = researchers.iter().collect();
        let skills: Vec<_> = skill_axes
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| required_skill(&format!("skill-{i}"), vec![x, y]))
            .collect();

        let first = build_matrix(&eligible, &skills, 2026, &config);
        let second = build_matrix(&eligible, &skills, 2026, &config);

        for row in 0..first.n_rows() {
            for col in 0..first.n_columns() {
                prop_assert_eq!(first.cell(row, col).score, second.cell(row, col).score);
            }
        }
    }

    #[test]
    fn greedy_coverage_never_decreases(
        embeddings in proptest::collection::vec((0.0f32..1.0, 0.0f32..1.0), 2..10),
        max_size in 1usize..8,
    ) {
        let scoring = ScoringConfig::default();
        let assembly = AssemblyConfig::default();
        let researchers = pool(&embeddings);
        let eligible: Vec<&ResearcherProfile> = researchers.iter().collect();
        let skills = vec![
            required_skill("a", vec![1.0, 0.0]),
            required_skill("b", vec![0.0, 1.0]),
        ];
        let matrix = build_matrix(&eligible, &skills, 2026, &scoring);

        let request = AssemblyRequest {
            min_team_size: 1,
            max_team_size: max_size,
            strategy: Strategy::Greedy,
            skill_weighting: SkillWeighting::default(),
        };
        let outcome = TeamAssembler::new(&matrix, &assembly).assemble(&request).unwrap();

        let mut last = 0.0_f64;
        for step in &outcome.trace {
            if step.decision == SelectionDecision::Selected {
                prop_assert!(step.aggregate_after >= last - 1e-9);
                last = step.aggregate_after;
            }
        }
    }

    #[test]
    fn assembly_is_deterministic_across_runs(
        embeddings in proptest::collection::vec((0.0f32..1.0, 0.0f32..1.0), 2..10),
    ) {
        let scoring = ScoringConfig::default();
        let assembly = AssemblyConfig::default();
        let researchers = pool(&embeddings);
        let eligible: Vec<&ResearcherProfile> = researchers.iter().collect();
        let skills = vec![
            required_skill("a", vec![1.0, 0.0]),
            required_skill("b", vec![0.0, 1.0]),
        ];
        let matrix = build_matrix(&eligible, &skills, 2026, &scoring);
        let request = AssemblyRequest {
            min_team_size: 1,
            max_team_size: 4,
            strategy: Strategy::Greedy,
            skill_weighting: SkillWeighting::default(),
        };

        let assembler = TeamAssembler::new(&matrix, &assembly);
        let first = assembler.assemble(&request).unwrap();
        let second = assembler.assemble(&request).unwrap();

        let ids = |outcome: &dreamteam::assembly::AssemblyOutcome| -> Vec<String> {
            outcome
                .team
                .members
                .iter()
                .map(|m| m.researcher_id.clone())
                .collect()
        };
        prop_assert_eq!(ids(&first), ids(&second));
    }
}
