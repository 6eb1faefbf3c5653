//! Error types for the knowledgebase.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using the knowledgebase Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for knowledgebase operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Concept not found
    #[error("Concept not found: {0}")]
    ConceptNotFound(Uuid),

    /// Statement not found
    #[error("Statement not found: {0}")]
    StatementNotFound(Uuid),

    /// Translation not found
    #[error("Translation not found: {0}")]
    TranslationNotFound(Uuid),

    /// Reference not found
    #[error("Reference not found: {0}")]
    ReferenceNotFound(Uuid),

    /// Invalid input (rejected at construction time)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Statement row with neither or both of {concept, statement} set
    #[error("Malformed statement: {0}")]
    MalformedStatement(String),

    /// Uniqueness or exclusivity violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Deletion blocked by a protected reference
    #[error("Protected: {0}")]
    Protected(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
