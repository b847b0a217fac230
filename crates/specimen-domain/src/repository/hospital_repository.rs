//! Hospital Repository - Abstract persistence for Hospitals

use crate::model::hospital::{Hospital, NewHospital};
use crate::repository::sample_repository::RepositoryError;

/// Hospital Repository Trait
///
/// This is a PORT in hexagonal architecture.
pub trait HospitalRepository: Send + Sync {
    /// Register a hospital, assigning its identity
    fn insert_hospital(
        &self,
        new: NewHospital,
    ) -> impl core::future::Future<Output = Result<Hospital, RepositoryError>> + Send;

    /// List all registered hospitals
    fn list_hospitals(
        &self,
    ) -> impl core::future::Future<Output = Result<Vec<Hospital>, RepositoryError>> + Send;
}
