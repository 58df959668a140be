//! Greedy marginal-gain selection.
//!
//! The standard weighted-maximum-coverage greedy approximation: each
//! round picks the candidate with the largest weighted mean-coverage
//! gain over the skills, with deterministic tie-breaks. Carries the
//! (1 - 1/e) quality bound; not guaranteed optimal.

use crate::config::AssemblyConfig;
use crate::model::SkillImportance;
use crate::scoring::AffinityMatrix;

use super::{AssemblyRequest, Selection, SelectionDecision, SelectionStep, SkillWeighting};

/// Gains within this tolerance are considered tied and fall through to
/// the mean-affinity and researcher-id tie-breaks.
const TIE_EPS: f64 = 1e-9;

/// Incremental greedy state, shared with the hybrid strategy so its
/// seeded picks participate in the same coverage accounting.
pub(super) struct GreedyRun<'m> {
    matrix: &'m AffinityMatrix,
    /// Per-column gain weights (required vs preferred).
    weights: Vec<f64>,
    weight_sum: f64,
    required: Vec<usize>,
    selected: Vec<bool>,
    coverage: Vec<f64>,
    rows: Vec<usize>,
    trace: Vec<SelectionStep>,
}

impl<'m> GreedyRun<'m> {
    pub(super) fn new(matrix: &'m AffinityMatrix, weighting: &SkillWeighting) -> Self {
        let weights: Vec<f64> = matrix
            .columns()
            .iter()
            .map(|column| match column.importance {
                SkillImportance::Required => weighting.required,
                SkillImportance::Preferred => weighting.preferred,
            })
            .collect();
        let weight_sum = weights.iter().sum();

        Self {
            matrix,
            weights,
            weight_sum,
            required: matrix.required_columns().collect(),
            selected: vec![false; matrix.n_rows()],
            coverage: vec![0.0; matrix.n_columns()],
            rows: Vec::new(),
            trace: Vec::new(),
        }
    }

    pub(super) fn is_selected(&self, row: usize) -> bool {
        self.selected[row]
    }

    pub(super) fn team_size(&self) -> usize {
        self.rows.len()
    }

    /// Weighted mean-coverage improvement from adding one candidate.
    /// Never negative: coverage is a running per-skill maximum.
    pub(super) fn marginal_gain(&self, row: usize) -> f64 {
        if self.weight_sum <= 0.0 {
            return 0.0;
        }
        let mut gain = 0.0;
        for (col, cell) in self.matrix.row_cells(row).iter().enumerate() {
            if self.weights[col] > 0.0 && cell.score > self.coverage[col] {
                gain += self.weights[col] * (cell.score - self.coverage[col]);
            }
        }
        gain / self.weight_sum
    }

    /// Mean coverage over required skills, matching the evaluator's
    /// primary aggregate.
    pub(super) fn aggregate(&self) -> f64 {
        if self.required.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.required.len() as f64;
        self.required.iter().map(|&c| self.coverage[c]).sum::<f64>() / n
    }

    /// Best unselected candidate: highest gain, then highest mean
    /// affinity across all skills, then lowest researcher id.
    pub(super) fn best_candidate(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64, f64)> = None;

        for row in 0..self.matrix.n_rows() {
            if self.selected[row] {
                continue;
            }
            let gain = self.marginal_gain(row);
            let better = match best {
                None => true,
                Some((best_row, best_gain, best_mean)) => {
                    if gain > best_gain + TIE_EPS {
                        true
                    } else if gain < best_gain - TIE_EPS {
                        false
                    } else {
                        let mean = self.matrix.mean_affinity(row);
                        if mean > best_mean + TIE_EPS {
                            true
                        } else if mean < best_mean - TIE_EPS {
                            false
                        } else {
                            self.matrix.rows()[row].researcher_id
                                < self.matrix.rows()[best_row].researcher_id
                        }
                    }
                }
            };
            if better {
                best = Some((row, gain, self.matrix.mean_affinity(row)));
            }
        }

        best.map(|(row, gain, _)| (row, gain))
    }

    /// Commit a pick: update coverage and append a trace step.
    pub(super) fn add(&mut self, row: usize, gain: f64, decision: SelectionDecision) {
        self.selected[row] = true;
        self.rows.push(row);
        for (col, cell) in self.matrix.row_cells(row).iter().enumerate() {
            if cell.score > self.coverage[col] {
                self.coverage[col] = cell.score;
            }
        }
        self.push_step(Some(row), gain, decision);
    }

    fn push_step(&mut self, row: Option<usize>, gain: f64, decision: SelectionDecision) {
        self.trace.push(SelectionStep {
            round: self.trace.len() + 1,
            researcher_id: row.map(|r| self.matrix.rows()[r].researcher_id.clone()),
            gain,
            aggregate_after: self.aggregate(),
            decision,
        });
    }

    /// The greedy loop. Respects the minimum size before honoring the
    /// epsilon early stop, so zero-gain members are still added while
    /// the team is undersized.
    pub(super) fn run_greedy(&mut self, request: &AssemblyRequest, config: &AssemblyConfig) {
        while self.rows.len() < request.max_team_size {
            let Some((row, gain)) = self.best_candidate() else {
                if self.rows.len() < request.min_team_size {
                    self.push_step(None, 0.0, SelectionDecision::PoolExhausted);
                }
                break;
            };
            if self.rows.len() >= request.min_team_size && gain < config.epsilon {
                self.push_step(Some(row), gain, SelectionDecision::GainBelowEpsilon);
                break;
            }
            self.add(row, gain, SelectionDecision::Selected);
        }
    }

    pub(super) fn into_selection(self) -> Selection {
        Selection {
            rows: self.rows,
            trace: self.trace,
        }
    }
}

pub(super) fn select(
    matrix: &AffinityMatrix,
    request: &AssemblyRequest,
    config: &AssemblyConfig,
) -> Selection {
    let mut run = GreedyRun::new(matrix, &request.skill_weighting);
    run.run_greedy(request, config);
    run.into_selection()
}
