//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors abort the current parse. There is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("structural error: {message}")]
    Structural { message: String },

    #[error("no registered model with name: [{tag}]({id})")]
    UnresolvedModel { tag: String, id: String },
}

impl DomainError {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
