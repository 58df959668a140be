//! The researcher × skill affinity matrix.
//!
//! Cells are stored in a flat row-major vector indexed by integer
//! offsets; the build is a data-parallel map over cell offsets since
//! every cell is independent and side-effect-free. The result is
//! deterministic for fixed inputs and `now`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::model::{ResearcherProfile, SkillDescriptor, SkillImportance};

use super::affinity::{AffinityCell, score_pair};

/// Row header: one eligible researcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixRow {
    pub researcher_id: String,
    pub researcher_name: String,
}

/// Column header: one skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixColumn {
    pub skill: String,
    pub importance: SkillImportance,
}

/// Immutable affinity grid for one request.
#[derive(Debug, Clone)]
pub struct AffinityMatrix {
    rows: Vec<MatrixRow>,
    columns: Vec<MatrixColumn>,
    cells: Vec<AffinityCell>,
}

impl AffinityMatrix {
    /// Assemble a matrix from precomputed parts (row-major cells).
    ///
    /// Intended for callers comparing strategies over a matrix scored
    /// elsewhere. Shape and score-range invariants are enforced here;
    /// [`build_matrix`] guarantees them by construction.
    pub fn from_parts(
        rows: Vec<MatrixRow>,
        columns: Vec<MatrixColumn>,
        cells: Vec<AffinityCell>,
    ) -> crate::error::Result<Self> {
        if cells.len() != rows.len() * columns.len() {
            return Err(crate::error::EngineError::Config(format!(
                "matrix shape mismatch: {} rows x {} columns but {} cells",
                rows.len(),
                columns.len(),
                cells.len()
            )));
        }
        if let Some(cell) = cells
            .iter()
            .find(|c| !(0.0..=100.0).contains(&c.score) || !c.score.is_finite())
        {
            return Err(crate::error::EngineError::Config(format!(
                "cell score {} outside [0, 100]",
                cell.score
            )));
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    #[must_use]
    pub fn columns(&self) -> &[MatrixColumn] {
        &self.columns
    }

    /// Cell at (row, column). Panics on out-of-range indices, which
    /// would be an internal bug: all indices flow from this matrix.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &AffinityCell {
        &self.cells[row * self.columns.len() + column]
    }

    #[must_use]
    pub fn row_cells(&self, row: usize) -> &[AffinityCell] {
        let width = self.columns.len();
        &self.cells[row * width..(row + 1) * width]
    }

    #[must_use]
    pub fn row_index(&self, researcher_id: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.researcher_id == researcher_id)
    }

    /// Column indices of required skills, in matrix order.
    pub fn required_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c.importance, SkillImportance::Required))
            .map(|(i, _)| i)
    }

    /// Column indices of preferred skills, in matrix order.
    pub fn preferred_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c.importance, SkillImportance::Preferred))
            .map(|(i, _)| i)
    }

    /// Mean score across all skills for one researcher. Used as the
    /// deterministic tie-break between equal-gain candidates.
    #[must_use]
    pub fn mean_affinity(&self, row: usize) -> f64 {
        let cells = self.row_cells(row);
        if cells.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = cells.len() as f64;
        cells.iter().map(|c| c.score).sum::<f64>() / n
    }

    /// Serializable projection of the full matrix.
    #[must_use]
    pub fn export(&self) -> AffinityMatrixExport {
        AffinityMatrixExport {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            cells: (0..self.n_rows())
                .map(|row| self.row_cells(row).to_vec())
                .collect(),
        }
    }
}

/// Full matrix with evidence ids, shaped for UI/export consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityMatrixExport {
    pub rows: Vec<MatrixRow>,
    pub columns: Vec<MatrixColumn>,
    /// Cell grid, outer index = researcher, inner = skill.
    pub cells: Vec<Vec<AffinityCell>>,
}

/// Score every (researcher, skill) pair.
///
/// Cells whose inputs fail an integrity check (mismatched embedding
/// dimensions) are degraded to score 0 with a warning instead of
/// aborting the build; a zero-score cell is a valid, informative
/// result.
#[must_use]
pub fn build_matrix(
    eligible: &[&ResearcherProfile],
    skills: &[SkillDescriptor],
    now: i32,
    config: &ScoringConfig,
) -> AffinityMatrix {
    let width = skills.len();
    debug!(
        researchers = eligible.len(),
        skills = width,
        now,
        "building affinity matrix"
    );

    let cells: Vec<AffinityCell> = (0..eligible.len() * width)
        .into_par_iter()
        .map(|offset| {
            let researcher = eligible[offset / width];
            let skill = &skills[offset % width];
            score_pair(researcher, skill, now, config).unwrap_or_else(|err| {
                warn!(
                    researcher = %researcher.id,
                    skill = %skill.text,
                    %err,
                    "degrading affinity cell"
                );
                AffinityCell::degraded()
            })
        })
        .collect();

    AffinityMatrix {
        rows: eligible
            .iter()
            .map(|r| MatrixRow {
                researcher_id: r.id.clone(),
                researcher_name: r.name.clone(),
            })
            .collect(),
        columns: skills
            .iter()
            .map(|s| MatrixColumn {
                skill: s.text.clone(),
                importance: s.importance,
            })
            .collect(),
        cells,
    }
}
