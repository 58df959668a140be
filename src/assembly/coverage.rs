//! Team coverage evaluation.
//!
//! Pure functions over a materialized matrix: per skill the team
//! achieves the best score among its members; the aggregate is the mean
//! of achieved scores across required skills. Preferred skills are
//! evaluated and reported separately, outside the primary aggregate.

use serde::{Deserialize, Serialize};

use crate::model::SkillImportance;
use crate::scoring::AffinityMatrix;

/// Achieved coverage for one skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCoverage {
    pub skill: String,
    pub importance: SkillImportance,
    /// Best affinity among team members, 0 for an empty team.
    pub achieved: f64,
    /// Member providing the best affinity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_researcher_id: Option<String>,
}

/// Coverage achieved by one candidate team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    pub required: Vec<SkillCoverage>,
    pub preferred: Vec<SkillCoverage>,
    /// Mean achieved score across required skills.
    pub aggregate: f64,
}

/// Evaluate a team given as matrix row indices.
#[must_use]
pub fn evaluate(member_rows: &[usize], matrix: &AffinityMatrix) -> CoverageReport {
    let required: Vec<SkillCoverage> = matrix
        .required_columns()
        .map(|col| skill_coverage(member_rows, matrix, col))
        .collect();
    let preferred: Vec<SkillCoverage> = matrix
        .preferred_columns()
        .map(|col| skill_coverage(member_rows, matrix, col))
        .collect();

    let aggregate = if required.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let n = required.len() as f64;
        required.iter().map(|c| c.achieved).sum::<f64>() / n
    };

    CoverageReport {
        required,
        preferred,
        aggregate,
    }
}

fn skill_coverage(member_rows: &[usize], matrix: &AffinityMatrix, column: usize) -> SkillCoverage {
    let mut achieved = 0.0_f64;
    let mut best: Option<usize> = None;
    for &row in member_rows {
        let score = matrix.cell(row, column).score;
        if score > achieved {
            achieved = score;
            best = Some(row);
        }
    }

    SkillCoverage {
        skill: matrix.columns()[column].skill.clone(),
        importance: matrix.columns()[column].importance,
        achieved,
        best_researcher_id: best.map(|row| matrix.rows()[row].researcher_id.clone()),
    }
}
