//! End-to-end orchestration: filter, score, assemble, rank, report.
//!
//! The engine owns no state beyond its configuration. Researcher
//! profiles, skills, and rules are injected per call and every produced
//! artifact is dropped with the returned value.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assembly::{AssemblyOutcome, AssemblyRequest, TeamAssembler};
use crate::config::EngineConfig;
use crate::eligibility::{EligibilityRules, Exclusion, filter};
use crate::error::Result;
use crate::model::{ResearcherProfile, SkillDescriptor};
use crate::ranking::{ResearcherRank, rank};
use crate::report::TeamReport;
use crate::scoring::{AffinityMatrixExport, build_matrix};

/// Everything one matching run produces.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matrix: AffinityMatrixExport,
    pub excluded: Vec<Exclusion>,
    /// One report per assembly request, in request order.
    pub reports: Vec<TeamReport>,
    pub ranking: Vec<ResearcherRank>,
}

impl MatchOutcome {
    /// Assembly outcomes without the report wrapping, in request order.
    pub fn outcomes(&self) -> impl Iterator<Item = &AssemblyOutcome> {
        self.reports.iter().map(|report| &report.outcome)
    }
}

/// The affinity scoring and team assembly engine.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: EngineConfig,
}

impl MatchEngine {
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline for one solicitation.
    ///
    /// All requests are validated before any scoring starts, so a bad
    /// request fails fast instead of after an expensive matrix build.
    /// The matrix is built once and shared across every request.
    pub fn run(
        &self,
        researchers: &[ResearcherProfile],
        skills: &[SkillDescriptor],
        rules: &EligibilityRules,
        requests: &[AssemblyRequest],
        now: i32,
    ) -> Result<MatchOutcome> {
        for request in requests {
            request.validate()?;
        }

        let outcome = filter(researchers, rules);
        info!(
            pool = researchers.len(),
            eligible = outcome.eligible.len(),
            skills = skills.len(),
            "starting matching run"
        );

        let matrix = build_matrix(&outcome.eligible, skills, now, &self.config.scoring);

        let assembler = TeamAssembler::new(&matrix, &self.config.assembly);
        let reports = requests
            .iter()
            .map(|request| {
                let assembled = assembler.assemble(request)?;
                Ok(TeamReport::build(&matrix, assembled, &self.config.assembly))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MatchOutcome {
            matrix: matrix.export(),
            excluded: outcome.excluded,
            ranking: rank(&matrix),
            reports,
        })
    }
}
