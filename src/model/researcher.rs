//! Researcher profiles and their owned publication and grant records.

use serde::{Deserialize, Serialize};

use super::sparse::SparseVector;

/// One publication with its precomputed vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationRecord {
    pub id: String,
    /// Publication year; records with unknown years never boost a score.
    pub year: Option<i32>,
    /// Dense embedding of the abstract (fixed dimension per corpus).
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Sparse keyword vector.
    #[serde(default)]
    pub sparse: SparseVector,
    #[serde(default)]
    pub citations: u32,
}

/// Role held on a funded grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantRole {
    Pi,
    CoPi,
    SeniorPersonnel,
    Other,
}

/// One funding award held by a researcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantRecord {
    pub award_id: String,
    pub year: Option<i32>,
    pub role: GrantRole,
    #[serde(default)]
    pub amount: f64,
}

/// A researcher as delivered by the upstream datastore. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearcherProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub h_index: u32,
    #[serde(default)]
    pub publications: Vec<PublicationRecord>,
    #[serde(default)]
    pub grants: Vec<GrantRecord>,
}

impl ResearcherProfile {
    /// Year of the earliest dated publication, if any.
    #[must_use]
    pub fn first_publication_year(&self) -> Option<i32> {
        self.publications.iter().filter_map(|p| p.year).min()
    }

    /// Keyword vector aggregated across all publications.
    #[must_use]
    pub fn aggregated_sparse(&self) -> SparseVector {
        let mut acc = SparseVector::new();
        for publication in &self.publications {
            acc.add_assign(&publication.sparse);
        }
        acc
    }
}
