//! Ownership Filter - Who may collect which sample
//!
//! The collection rule is a compound predicate:
//!
//! ```text
//! id = sample_id  AND  agent_id = requesting_agent  AND  status = PENDING
//! ```
//!
//! Stores evaluate it and apply the transition as one step. A sample that
//! does not exist, belongs to another agent, or was already collected all
//! fail the same predicate, so callers can never tell them apart.

use crate::model::agent::AgentId;
use crate::model::sample::{Sample, SampleId, SampleStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipFilter {
    sample_id: SampleId,
    agent_id: AgentId,
    required_status: SampleStatus,
}

impl OwnershipFilter {
    /// Filter for a one-shot PENDING → COLLECTED transition
    pub fn collectable(sample_id: SampleId, agent_id: AgentId) -> Self {
        Self {
            sample_id,
            agent_id,
            required_status: SampleStatus::Pending,
        }
    }

    pub fn sample_id(&self) -> &SampleId {
        &self.sample_id
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        sample.id() == &self.sample_id
            && sample.agent_id() == &self.agent_id
            && sample.status() == self.required_status
    }
}
