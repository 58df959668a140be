//! Team assembly over a materialized affinity matrix.
//!
//! Strategies are a tagged variant, each a stateless pure selection
//! function; the assembler validates the request, dispatches, and turns
//! the selected rows into a justified roster with its coverage report
//! and selection trace. Assembly is sequential by nature (each pick
//! changes the remaining gains) but independent requests over the same
//! matrix can run concurrently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AssemblyConfig;
use crate::error::{EngineError, Result};
use crate::scoring::AffinityMatrix;

pub mod coverage;
mod greedy;
mod hybrid;
mod topk;

pub use coverage::{CoverageReport, SkillCoverage, evaluate};

/// Team selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Greedy,
    Topk,
    Hybrid,
}

impl Strategy {
    pub const ALL: [Self; 3] = [Self::Greedy, Self::Topk, Self::Hybrid];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Greedy => "greedy",
            Self::Topk => "topk",
            Self::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "topk" => Ok(Self::Topk),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(EngineError::Config(format!(
                "unknown strategy '{other}' (expected greedy, topk, or hybrid)"
            ))),
        }
    }
}

/// Relative weight of required vs preferred skills in marginal gain.
/// Preferred skills default to 0 and stay out of the primary aggregate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkillWeighting {
    pub required: f64,
    pub preferred: f64,
}

impl Default for SkillWeighting {
    fn default() -> Self {
        Self {
            required: 1.0,
            preferred: 0.0,
        }
    }
}

/// One assembly request over an existing matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyRequest {
    pub min_team_size: usize,
    pub max_team_size: usize,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub skill_weighting: SkillWeighting,
}

impl AssemblyRequest {
    /// Request with configured default bounds and the given strategy.
    #[must_use]
    pub fn with_strategy(config: &AssemblyConfig, strategy: Strategy) -> Self {
        Self {
            min_team_size: config.min_team_size,
            max_team_size: config.max_team_size,
            strategy,
            skill_weighting: SkillWeighting::default(),
        }
    }

    /// Fail fast on bounds the strategies cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.min_team_size == 0 {
            return Err(EngineError::Config(
                "min_team_size must be positive".to_string(),
            ));
        }
        if self.max_team_size < self.min_team_size {
            return Err(EngineError::Config(format!(
                "max_team_size ({}) below min_team_size ({})",
                self.max_team_size, self.min_team_size
            )));
        }
        if self.skill_weighting.required <= 0.0 {
            return Err(EngineError::Config(format!(
                "skill_weighting.required must be positive, got {}",
                self.skill_weighting.required
            )));
        }
        if self.skill_weighting.preferred < 0.0 {
            return Err(EngineError::Config(format!(
                "skill_weighting.preferred must be non-negative, got {}",
                self.skill_weighting.preferred
            )));
        }
        Ok(())
    }
}

/// Why a trace step exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionDecision {
    /// Candidate joined the team by marginal gain or column top-score.
    Selected,
    /// Candidate joined as a scarcity seed (hybrid).
    Seeded,
    /// Best remaining candidate fell below epsilon; selection stopped.
    GainBelowEpsilon,
    /// No unselected candidates remained before the minimum was met.
    PoolExhausted,
}

/// One row of the selection trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionStep {
    pub round: usize,
    /// Candidate under consideration; absent for pool exhaustion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub researcher_id: Option<String>,
    pub gain: f64,
    /// Aggregate required-skill coverage after this step.
    pub aggregate_after: f64,
    pub decision: SelectionDecision,
}

/// Strategy output before roster construction.
pub(crate) struct Selection {
    pub rows: Vec<usize>,
    pub trace: Vec<SelectionStep>,
}

/// Position on the assembled team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    Lead,
    Member,
}

/// One roster entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub researcher_id: String,
    pub name: String,
    pub role: TeamRole,
    /// Affinity per matrix column, in column order.
    pub affinities: Vec<f64>,
    pub justification: String,
}

/// An assembled team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamCandidate {
    pub strategy: Strategy,
    pub members: Vec<TeamMember>,
    /// Set when the eligible pool could not reach the minimum size.
    pub partial_coverage: bool,
}

/// Everything a strategy invocation produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyOutcome {
    pub team: TeamCandidate,
    pub coverage: CoverageReport,
    pub trace: Vec<SelectionStep>,
}

/// Assembles teams from one read-only matrix.
pub struct TeamAssembler<'m> {
    matrix: &'m AffinityMatrix,
    config: &'m AssemblyConfig,
}

impl<'m> TeamAssembler<'m> {
    #[must_use]
    pub const fn new(matrix: &'m AffinityMatrix, config: &'m AssemblyConfig) -> Self {
        Self { matrix, config }
    }

    /// Run one strategy to a finalized team.
    ///
    /// An undersized eligible pool is recovered into a
    /// `partial_coverage` team rather than an error; invalid requests
    /// fail before any selection work.
    pub fn assemble(&self, request: &AssemblyRequest) -> Result<AssemblyOutcome> {
        request.validate()?;

        if self.matrix.n_rows() < request.min_team_size {
            let err = EngineError::InsufficientCandidates {
                pool: self.matrix.n_rows(),
                min: request.min_team_size,
            };
            warn!(%err, "assembling anyway; team will be flagged partial");
        }

        let selection = match request.strategy {
            Strategy::Greedy => greedy::select(self.matrix, request, self.config),
            Strategy::Topk => topk::select(self.matrix, request, self.config),
            Strategy::Hybrid => hybrid::select(self.matrix, request, self.config),
        };

        let coverage = evaluate(&selection.rows, self.matrix);
        let team = self.build_team(request, &selection);
        info!(
            strategy = %request.strategy,
            members = team.members.len(),
            aggregate = coverage.aggregate,
            partial = team.partial_coverage,
            "team finalized"
        );

        Ok(AssemblyOutcome {
            team,
            coverage,
            trace: selection.trace,
        })
    }

    fn build_team(&self, request: &AssemblyRequest, selection: &Selection) -> TeamCandidate {
        let picks: Vec<&SelectionStep> = selection
            .trace
            .iter()
            .filter(|step| {
                matches!(
                    step.decision,
                    SelectionDecision::Selected | SelectionDecision::Seeded
                )
            })
            .collect();

        let members = selection
            .rows
            .iter()
            .zip(&picks)
            .enumerate()
            .map(|(position, (&row, step))| {
                let header = &self.matrix.rows()[row];
                TeamMember {
                    researcher_id: header.researcher_id.clone(),
                    name: header.researcher_name.clone(),
                    role: if position == 0 {
                        TeamRole::Lead
                    } else {
                        TeamRole::Member
                    },
                    affinities: self
                        .matrix
                        .row_cells(row)
                        .iter()
                        .map(|cell| cell.score)
                        .collect(),
                    justification: self.justification(row, step),
                }
            })
            .collect();

        TeamCandidate {
            strategy: request.strategy,
            members,
            partial_coverage: selection.rows.len() < request.min_team_size,
        }
    }

    fn justification(&self, row: usize, step: &SelectionStep) -> String {
        let strongest = self
            .matrix
            .required_columns()
            .max_by(|&a, &b| {
                self.matrix
                    .cell(row, a)
                    .score
                    .partial_cmp(&self.matrix.cell(row, b).score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|column| {
                (
                    self.matrix.columns()[column].skill.clone(),
                    self.matrix.cell(row, column).score,
                )
            });

        let joined = match step.decision {
            SelectionDecision::Seeded => "seeded for scarce skill coverage",
            _ => "selected by marginal gain",
        };

        strongest.map_or_else(
            || format!("round {}: {joined} ({:+.2})", step.round, step.gain),
            |(skill, score)| {
                format!(
                    "round {}: {joined} ({:+.2}); strongest requirement '{skill}' at {score:.1}",
                    step.round, step.gain
                )
            },
        )
    }
}
