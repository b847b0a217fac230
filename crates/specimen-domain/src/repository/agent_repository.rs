//! Agent Repository - Abstract persistence for Agents
//!
//! Agents are registered once per real-world operator, under the id issued
//! by the identity provider.

use crate::model::agent::{Agent, AgentId};
use crate::repository::sample_repository::RepositoryError;

/// Agent Repository Trait
///
/// This is a PORT in hexagonal architecture.
pub trait AgentRepository: Send + Sync {
    /// Register an agent. Fails with [`RepositoryError::Duplicate`] if the id is taken.
    fn insert_agent(
        &self,
        agent: Agent,
    ) -> impl core::future::Future<Output = Result<Agent, RepositoryError>> + Send;

    /// Find an agent by ID
    fn find_agent(
        &self,
        id: &AgentId,
    ) -> impl core::future::Future<Output = Result<Option<Agent>, RepositoryError>> + Send;
}
