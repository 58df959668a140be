//! Grant experience factor.

use crate::config::{RoleWeights, ScoringConfig};
use crate::model::{GrantRecord, GrantRole};

use super::recency::recency_weight;

/// Multiplicative bonus derived from funding history, always >= 1.
///
/// Each grant contributes `role_weight * recency_weight(year)`; the sum
/// is damped through `1 + ln(1 + sum)` so prolific grant-holders cannot
/// dominate the affinity score. An empty history contributes nothing
/// (factor exactly 1).
#[must_use]
pub fn experience_factor(grants: &[GrantRecord], now: i32, config: &ScoringConfig) -> f64 {
    let sum: f64 = grants
        .iter()
        .map(|grant| {
            role_weight(grant.role, &config.role_weights)
                * recency_weight(grant.year, now, config.half_life_years)
        })
        .sum();
    1.0 + (1.0 + sum).ln()
}

const fn role_weight(role: GrantRole, weights: &RoleWeights) -> f64 {
    match role {
        GrantRole::Pi => weights.pi,
        GrantRole::CoPi => weights.co_pi,
        GrantRole::SeniorPersonnel => weights.senior_personnel,
        GrantRole::Other => weights.other,
    }
}
