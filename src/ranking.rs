//! Ranked individual researcher matches.
//!
//! A per-researcher view over the affinity matrix: overall affinity is
//! the mean of the required-skill scores, with component means and the
//! strongest skill retained for explanation. Ordering is total and
//! deterministic.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::scoring::AffinityMatrix;

/// One researcher's standing against the whole solicitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearcherRank {
    pub researcher_id: String,
    pub name: String,
    /// Mean score across required skills.
    pub score: f64,
    /// Mean sparse keyword component across required skills.
    pub structured: f64,
    /// Mean embedding component across required skills.
    pub conceptual: f64,
    /// Required skill with the researcher's highest affinity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_skill: Option<String>,
}

/// Rank all matrix rows, best first. Ties break on researcher id
/// ascending.
#[must_use]
pub fn rank(matrix: &AffinityMatrix) -> Vec<ResearcherRank> {
    let required: Vec<usize> = matrix.required_columns().collect();

    (0..matrix.n_rows())
        .map(|row| rank_row(matrix, row, &required))
        .sorted_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.researcher_id.cmp(&b.researcher_id))
        })
        .collect()
}

fn rank_row(matrix: &AffinityMatrix, row: usize, required: &[usize]) -> ResearcherRank {
    let header = &matrix.rows()[row];
    if required.is_empty() {
        return ResearcherRank {
            researcher_id: header.researcher_id.clone(),
            name: header.researcher_name.clone(),
            score: 0.0,
            structured: 0.0,
            conceptual: 0.0,
            best_skill: None,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let n = required.len() as f64;
    let mut score = 0.0;
    let mut structured = 0.0;
    let mut conceptual = 0.0;
    let mut best: Option<(usize, f64)> = None;

    for &column in required {
        let cell = matrix.cell(row, column);
        score += cell.score;
        structured += cell.structured;
        conceptual += cell.conceptual;
        if best.is_none_or(|(_, top)| cell.score > top) {
            best = Some((column, cell.score));
        }
    }

    ResearcherRank {
        researcher_id: header.researcher_id.clone(),
        name: header.researcher_name.clone(),
        score: score / n,
        structured: structured / n,
        conceptual: conceptual / n,
        best_skill: best.map(|(column, _)| matrix.columns()[column].skill.clone()),
    }
}
