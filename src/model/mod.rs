//! Input data model: researcher profiles, publications, grants, and
//! skill descriptors.
//!
//! Everything here is a read-only input to the engine, owned by the
//! upstream datastore and injected per request.

pub mod researcher;
pub mod skill;
pub mod sparse;

pub use researcher::{GrantRecord, GrantRole, PublicationRecord, ResearcherProfile};
pub use skill::{SkillDescriptor, SkillImportance};
pub use sparse::SparseVector;
