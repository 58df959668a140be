//! Builders for synthetic researchers and skills.
//!
//! Used by unit, property, and integration tests and by the benchmarks.
//! Embeddings are tiny (2-4 dimensions) unless a test asks otherwise;
//! the scoring math does not care about the production dimension.

use crate::model::{
    GrantRecord, GrantRole, PublicationRecord, ResearcherProfile, SkillDescriptor,
    SkillImportance, SparseVector,
};

/// Builder for a [`ResearcherProfile`].
#[derive(Debug, Clone)]
pub struct ResearcherBuilder {
    profile: ResearcherProfile,
}

impl ResearcherBuilder {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            profile: ResearcherProfile {
                id: id.to_string(),
                name: format!("Researcher {id}"),
                department: "Science".to_string(),
                h_index: 10,
                publications: Vec::new(),
                grants: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.profile.name = name.to_string();
        self
    }

    #[must_use]
    pub fn department(mut self, department: &str) -> Self {
        self.profile.department = department.to_string();
        self
    }

    #[must_use]
    pub fn h_index(mut self, h_index: u32) -> Self {
        self.profile.h_index = h_index;
        self
    }

    /// Add a publication with the given year and embedding.
    #[must_use]
    pub fn publication(mut self, id: &str, year: i32, embedding: Vec<f32>) -> Self {
        self.profile.publications.push(PublicationRecord {
            id: id.to_string(),
            year: Some(year),
            embedding,
            sparse: SparseVector::new(),
            citations: 10,
        });
        self
    }

    /// Add a publication carrying keyword terms as well.
    #[must_use]
    pub fn publication_with_terms(
        mut self,
        id: &str,
        year: i32,
        embedding: Vec<f32>,
        terms: &[&str],
    ) -> Self {
        self.profile.publications.push(PublicationRecord {
            id: id.to_string(),
            year: Some(year),
            embedding,
            sparse: SparseVector::from_terms(terms.iter().copied()),
            citations: 10,
        });
        self
    }

    #[must_use]
    pub fn grant(mut self, award_id: &str, year: i32, role: GrantRole) -> Self {
        self.profile.grants.push(GrantRecord {
            award_id: award_id.to_string(),
            year: Some(year),
            role,
            amount: 100_000.0,
        });
        self
    }

    #[must_use]
    pub fn build(self) -> ResearcherProfile {
        self.profile
    }
}

/// A researcher with one current-year publication at the given
/// embedding. The workhorse for scoring and assembly tests.
#[must_use]
pub fn specialist(id: &str, year: i32, embedding: Vec<f32>) -> ResearcherProfile {
    ResearcherBuilder::new(id)
        .publication(&format!("{id}-p1"), year, embedding)
        .build()
}

/// A required skill with the given embedding.
#[must_use]
pub fn required_skill(text: &str, embedding: Vec<f32>) -> SkillDescriptor {
    SkillDescriptor {
        text: text.to_string(),
        embedding,
        sparse: None,
        importance: SkillImportance::Required,
    }
}

/// A preferred skill with the given embedding.
#[must_use]
pub fn preferred_skill(text: &str, embedding: Vec<f32>) -> SkillDescriptor {
    SkillDescriptor {
        text: text.to_string(),
        embedding,
        sparse: None,
        importance: SkillImportance::Preferred,
    }
}

/// A unit basis vector: dimension `dim`, 1.0 at `axis`.
#[must_use]
pub fn basis(dim: usize, axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; dim];
    v[axis] = 1.0;
    v
}
