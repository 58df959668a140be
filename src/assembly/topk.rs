//! Top-scorer-per-skill selection.
//!
//! Round-robins over the required skills, each taking its best
//! unselected scorer, until the team is full. Favors specialists over
//! generalists; makes no marginal-gain tradeoffs.

use crate::config::AssemblyConfig;
use crate::scoring::AffinityMatrix;

use super::greedy::GreedyRun;
use super::{AssemblyRequest, Selection, SelectionDecision};

pub(super) fn select(
    matrix: &AffinityMatrix,
    request: &AssemblyRequest,
    _config: &AssemblyConfig,
) -> Selection {
    // Reuse the greedy bookkeeping for coverage and trace; only the
    // pick order differs.
    let mut run = GreedyRun::new(matrix, &request.skill_weighting);
    let required: Vec<usize> = matrix.required_columns().collect();

    if required.is_empty() || matrix.n_rows() == 0 {
        return run.into_selection();
    }

    'fill: loop {
        let before = run.team_size();
        for &column in &required {
            if run.team_size() >= request.max_team_size {
                break 'fill;
            }
            let Some(row) = top_unselected(matrix, &run, column) else {
                break 'fill; // pool exhausted
            };
            let gain = run.marginal_gain(row);
            run.add(row, gain, SelectionDecision::Selected);
        }
        // No skill could pick anyone this pass.
        if run.team_size() == before {
            break;
        }
    }

    run.into_selection()
}

/// Best unselected scorer for one column, ties to the lower researcher
/// id for determinism.
pub(super) fn top_unselected(
    matrix: &AffinityMatrix,
    run: &GreedyRun<'_>,
    column: usize,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for row in 0..matrix.n_rows() {
        if run.is_selected(row) {
            continue;
        }
        best = Some(match best {
            None => row,
            Some(current) => {
                let incumbent = matrix.cell(current, column).score;
                let challenger = matrix.cell(row, column).score;
                if challenger > incumbent {
                    row
                } else if challenger < incumbent {
                    current
                } else if matrix.rows()[row].researcher_id
                    < matrix.rows()[current].researcher_id
                {
                    row
                } else {
                    current
                }
            }
        });
    }
    best
}
