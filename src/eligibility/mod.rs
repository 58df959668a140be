//! Hard-constraint screening applied before any scoring.
//!
//! Rules are boolean predicates combined with AND; a researcher failing
//! any active rule is excluded, but every exclusion keeps its reason
//! codes so downstream consumers can explain the roster. With no active
//! rules the filter is the identity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ResearcherProfile;

/// Named predicate configuration supplied with a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityRules {
    /// Career-stage screen: earliest publication year must be at or
    /// after this cutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_career_since: Option<i32>,
    /// Affiliation allow-list (case-insensitive department match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_departments: Option<Vec<String>>,
    /// Conflict-of-interest exclusions by researcher id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_researchers: Vec<String>,
    /// Require at least one grant record.
    #[serde(default)]
    pub require_grant_history: bool,
}

impl EligibilityRules {
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.early_career_since.is_none()
            && self.allowed_departments.is_none()
            && self.excluded_researchers.is_empty()
            && !self.require_grant_history
    }
}

/// Why a researcher was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    CareerStage,
    Affiliation,
    ConflictOfInterest,
    NoGrantHistory,
}

/// One removed researcher with every failing rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exclusion {
    pub researcher_id: String,
    pub researcher_name: String,
    pub reasons: Vec<ExclusionReason>,
}

/// Filter result: surviving profiles plus the annotated removals.
#[derive(Debug)]
pub struct FilterOutcome<'a> {
    pub eligible: Vec<&'a ResearcherProfile>,
    pub excluded: Vec<Exclusion>,
}

/// Apply the active rules to the researcher pool.
#[must_use]
pub fn filter<'a>(
    researchers: &'a [ResearcherProfile],
    rules: &EligibilityRules,
) -> FilterOutcome<'a> {
    let mut eligible = Vec::with_capacity(researchers.len());
    let mut excluded = Vec::new();

    for researcher in researchers {
        let reasons = failing_reasons(researcher, rules);
        if reasons.is_empty() {
            eligible.push(researcher);
        } else {
            excluded.push(Exclusion {
                researcher_id: researcher.id.clone(),
                researcher_name: researcher.name.clone(),
                reasons,
            });
        }
    }

    debug!(
        eligible = eligible.len(),
        excluded = excluded.len(),
        "eligibility filter applied"
    );

    FilterOutcome { eligible, excluded }
}

fn failing_reasons(
    researcher: &ResearcherProfile,
    rules: &EligibilityRules,
) -> Vec<ExclusionReason> {
    let mut reasons = Vec::new();

    if let Some(cutoff) = rules.early_career_since {
        let passes = researcher
            .first_publication_year()
            .is_some_and(|year| year >= cutoff);
        if !passes {
            reasons.push(ExclusionReason::CareerStage);
        }
    }

    if let Some(departments) = &rules.allowed_departments {
        let passes = departments
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&researcher.department));
        if !passes {
            reasons.push(ExclusionReason::Affiliation);
        }
    }

    if rules
        .excluded_researchers
        .iter()
        .any(|id| id == &researcher.id)
    {
        reasons.push(ExclusionReason::ConflictOfInterest);
    }

    if rules.require_grant_history && researcher.grants.is_empty() {
        reasons.push(ExclusionReason::NoGrantHistory);
    }

    reasons
}
