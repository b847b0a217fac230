//! Error types for the use case layer

use specimen_domain::{ReferenceKind, RepositoryError};
use thiserror::Error;

/// Stable failure categories surfaced to the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Reference,
    NotFoundOrForbidden,
    Infrastructure,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Dangling hospital or agent reference
    #[error("{0}")]
    Reference(String),

    /// Sample is absent, assigned to someone else, or no longer collectable
    #[error("Sample not found or you do not have permission to update it.")]
    NotFoundOrForbidden,

    /// Store unavailable or failed to persist
    #[error("Store unavailable: {0}")]
    Infrastructure(String),
}

impl ServiceError {
    pub fn missing_field(field: &str) -> Self {
        ServiceError::Validation(format!("Missing required field: {}.", field))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Reference(_) => ErrorKind::Reference,
            ServiceError::NotFoundOrForbidden => ErrorKind::NotFoundOrForbidden,
            ServiceError::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::MissingReference { kind, id } => {
                let subject = match kind {
                    ReferenceKind::Hospital => "Hospital",
                    ReferenceKind::Agent => "Agent",
                };
                ServiceError::Reference(format!("{} '{}' does not exist.", subject, id))
            }
            RepositoryError::Duplicate { id } => {
                ServiceError::Infrastructure(format!("unexpected duplicate record {}", id))
            }
            RepositoryError::Unavailable { message } => ServiceError::Infrastructure(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
