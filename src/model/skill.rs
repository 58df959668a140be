//! Skill descriptors extracted from a funding solicitation.

use serde::{Deserialize, Serialize};

use super::sparse::SparseVector;

/// Whether a skill must be covered or merely strengthens a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillImportance {
    #[default]
    Required,
    Preferred,
}

/// One skill requirement from a solicitation. Immutable per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDescriptor {
    /// The skill phrase as extracted upstream.
    pub text: String,
    /// Dense embedding of the phrase (same dimension as the publication
    /// corpus).
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Optional sparse keyword vector; when absent the structured
    /// component of the affinity score is 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse: Option<SparseVector>,
    #[serde(default)]
    pub importance: SkillImportance,
}

impl SkillDescriptor {
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.importance, SkillImportance::Required)
    }

    /// Fill a missing sparse vector from keywords extracted out of the
    /// skill phrase. Leaves an existing vector untouched.
    pub fn derive_sparse_if_missing(&mut self) {
        if self.sparse.is_none() {
            let derived = SparseVector::from_text(&self.text);
            if !derived.is_empty() {
                self.sparse = Some(derived);
            }
        }
    }
}
