//! Crate-wide error type.

use thiserror::Error;

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or dimension-mismatched input data. Fatal for the
    /// affected matrix cell only; the builder degrades the cell and
    /// continues.
    #[error("data integrity: {context}: expected dimension {expected}, got {actual}")]
    DataIntegrity {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Eligible pool too small for the requested minimum team size.
    /// Recovered locally into a partial-coverage team, never surfaced
    /// from assembly.
    #[error("insufficient candidates: pool of {pool} below minimum team size {min}")]
    InsufficientCandidates { pool: usize, min: usize },

    /// Invalid request or configuration. Raised synchronously before any
    /// scoring work begins.
    #[error("configuration: {0}")]
    Config(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EngineError {
    /// Stable machine-readable code for robot-mode output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DataIntegrity { .. } => "data_integrity",
            Self::InsufficientCandidates { .. } => "insufficient_candidates",
            Self::Config(_) => "configuration",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Toml(_) => "toml",
        }
    }
}
