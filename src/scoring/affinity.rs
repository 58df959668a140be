//! Fused affinity score for one (researcher, skill) pair.
//!
//! Two signals are blended: a conceptual component from dense embedding
//! similarity over the researcher's publications (recency-weighted, peak
//! plus a capped density bonus) and a structured component from sparse
//! keyword overlap. The blend is then multiplied by the grant experience
//! factor and clamped to [0, 100].

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::model::{ResearcherProfile, SkillDescriptor};

use super::grants::experience_factor;
use super::recency::recency_weight;
use super::vectors::cosine_dense;

/// One cell of the affinity matrix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffinityCell {
    /// Fused score in [0, 100].
    pub score: f64,
    /// Sparse keyword component in [0, 1].
    pub structured: f64,
    /// Embedding component in [0, 1].
    pub conceptual: f64,
    /// Publication that produced the conceptual peak.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_publication_id: Option<String>,
    /// Set when the cell's inputs failed an integrity check and the
    /// score was defaulted to zero.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl AffinityCell {
    /// Cell standing in for a pair whose inputs failed validation.
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            degraded: true,
            ..Self::default()
        }
    }
}

/// Score one researcher against one skill.
///
/// Errors only on dimension-mismatched embeddings; every other thin
/// input (no publications, missing sparse vectors, undated records)
/// degrades the corresponding component to zero instead.
pub fn score_pair(
    researcher: &ResearcherProfile,
    skill: &SkillDescriptor,
    now: i32,
    config: &ScoringConfig,
) -> Result<AffinityCell> {
    let (conceptual, evidence_publication_id) = conceptual_component(researcher, skill, now, config)?;
    let structured = structured_component(researcher, skill);

    let academic = config.alpha * structured + (1.0 - config.alpha) * conceptual;
    let factor = experience_factor(&researcher.grants, now, config);
    let score = (academic * factor * 100.0).min(100.0);

    Ok(AffinityCell {
        score,
        structured,
        conceptual,
        evidence_publication_id,
        degraded: false,
    })
}

/// Peak recency-weighted embedding similarity over the researcher's
/// publications, plus a capped log bonus for publication density near
/// the peak. Judged on the strongest relevant work, not the average.
fn conceptual_component(
    researcher: &ResearcherProfile,
    skill: &SkillDescriptor,
    now: i32,
    config: &ScoringConfig,
) -> Result<(f64, Option<String>)> {
    if researcher.publications.is_empty() || skill.embedding.is_empty() {
        return Ok((0.0, None));
    }

    let mut peak = 0.0_f64;
    let mut evidence: Option<&str> = None;
    let mut weighted: Vec<f64> = Vec::with_capacity(researcher.publications.len());

    for publication in &researcher.publications {
        let similarity = cosine_dense(
            &publication.embedding,
            &skill.embedding,
            &format!("publication {}", publication.id),
        )?;
        let weighted_sim = f64::from(similarity.max(0.0))
            * recency_weight(publication.year, now, config.half_life_years);
        if weighted_sim > peak {
            peak = weighted_sim;
            evidence = Some(&publication.id);
        }
        weighted.push(weighted_sim);
    }

    if peak <= 0.0 {
        return Ok((0.0, None));
    }

    let supporting = weighted
        .iter()
        .filter(|&&sim| sim >= peak * config.density_threshold)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let bonus = (1.0 + supporting as f64).ln().min(config.density_bonus_cap);

    Ok((
        (peak + bonus).min(1.0),
        evidence.map(ToString::to_string),
    ))
}

/// Sparse keyword overlap between the researcher's aggregated
/// publication vector and the skill's sparse vector. Missing either
/// side yields 0, never an error.
fn structured_component(researcher: &ResearcherProfile, skill: &SkillDescriptor) -> f64 {
    let Some(skill_sparse) = &skill.sparse else {
        return 0.0;
    };
    let aggregated = researcher.aggregated_sparse();
    f64::from(aggregated.cosine(skill_sparse))
}
