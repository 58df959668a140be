//! Affinity scoring: recency decay, grant experience, sparse/dense
//! signal fusion, and the researcher × skill matrix build.

pub mod affinity;
pub mod grants;
pub mod matrix;
pub mod recency;
pub mod vectors;

pub use affinity::{AffinityCell, score_pair};
pub use grants::experience_factor;
pub use matrix::{AffinityMatrix, AffinityMatrixExport, MatrixColumn, MatrixRow, build_matrix};
pub use recency::recency_weight;
