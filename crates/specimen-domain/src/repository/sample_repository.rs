//! Sample Repository - Abstract persistence for Samples
//!
//! The store is the only shared mutable resource in the system, so the
//! ownership check of a collection must be evaluated by the store itself,
//! in the same step as the mutation.

use crate::model::agent::AgentId;
use crate::model::sample::{NewSample, Sample, SampleId, SampleWithHospital};
use crate::model::timestamp::Timestamp;
use crate::service::ownership::OwnershipFilter;

/// Which foreign key failed the referential-integrity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Hospital,
    Agent,
}

impl core::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReferenceKind::Hospital => f.write_str("hospital"),
            ReferenceKind::Agent => f.write_str("agent"),
        }
    }
}

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Insert referenced a hospital or agent that does not exist
    MissingReference { kind: ReferenceKind, id: String },
    /// Insert collided with an existing identity
    Duplicate { id: String },
    /// Store could not be reached or failed to persist
    Unavailable { message: String },
}

impl RepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        RepositoryError::Unavailable {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::MissingReference { kind, id } => {
                write!(f, "Referenced {} does not exist: {}", kind, id)
            }
            RepositoryError::Duplicate { id } => {
                write!(f, "Record already exists: {}", id)
            }
            RepositoryError::Unavailable { message } => {
                write!(f, "Store unavailable: {}", message)
            }
        }
    }
}

/// Sample Repository Trait
///
/// This is a PORT in hexagonal architecture.
pub trait SampleRepository: Send + Sync {
    /// Insert a PENDING sample, assigning its identity.
    ///
    /// Fails with [`RepositoryError::MissingReference`] when the hospital or
    /// agent does not exist at the moment of insertion.
    fn insert_sample(
        &self,
        new: NewSample,
        created_at: Timestamp,
    ) -> impl core::future::Future<Output = Result<Sample, RepositoryError>> + Send;

    /// Read a sample by identity
    fn find_sample(
        &self,
        id: &SampleId,
    ) -> impl core::future::Future<Output = Result<Option<Sample>, RepositoryError>> + Send;

    /// All samples assigned to `agent_id`, each joined with its hospital.
    ///
    /// Ordered by creation time, then id, so repeated reads are stable.
    fn find_by_agent_with_hospital(
        &self,
        agent_id: &AgentId,
    ) -> impl core::future::Future<Output = Result<Vec<SampleWithHospital>, RepositoryError>> + Send;

    /// Atomically collect every sample matching `filter`.
    ///
    /// Matching and mutation happen as one indivisible step inside the
    /// store. Returns the number of rows changed.
    fn collect_matching(
        &self,
        filter: &OwnershipFilter,
        collected_at: Timestamp,
    ) -> impl core::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
