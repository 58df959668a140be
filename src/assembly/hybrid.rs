//! Scarcity-seeded greedy selection.
//!
//! Ranks required skills by how few candidates score highly on them,
//! seeds the team with the top scorer for each of the hardest skills,
//! then hands over to the greedy loop for the remaining slots.

use tracing::debug;

use crate::config::AssemblyConfig;
use crate::scoring::AffinityMatrix;

use super::greedy::GreedyRun;
use super::topk::top_unselected;
use super::{AssemblyRequest, Selection, SelectionDecision};

pub(super) fn select(
    matrix: &AffinityMatrix,
    request: &AssemblyRequest,
    config: &AssemblyConfig,
) -> Selection {
    let mut run = GreedyRun::new(matrix, &request.skill_weighting);

    // Hardest first: fewest strong scorers, column order as tie-break.
    let mut by_scarcity: Vec<(usize, usize)> = matrix
        .required_columns()
        .map(|column| (strong_scorers(matrix, column, config.high_score_threshold), column))
        .collect();
    by_scarcity.sort_by_key(|&(count, column)| (count, column));

    // Seed at most half the roster so greedy keeps room to balance.
    let seed_budget = (request.max_team_size / 2).max(1);
    for &(count, column) in by_scarcity.iter().take(seed_budget) {
        if run.team_size() >= request.max_team_size {
            break;
        }
        let Some(row) = top_unselected(matrix, &run, column) else {
            break;
        };
        debug!(
            skill = %matrix.columns()[column].skill,
            strong_scorers = count,
            researcher = %matrix.rows()[row].researcher_id,
            "seeding scarce skill"
        );
        let gain = run.marginal_gain(row);
        run.add(row, gain, SelectionDecision::Seeded);
    }

    run.run_greedy(request, config);
    run.into_selection()
}

fn strong_scorers(matrix: &AffinityMatrix, column: usize, threshold: f64) -> usize {
    (0..matrix.n_rows())
        .filter(|&row| matrix.cell(row, column).score >= threshold)
        .count()
}
