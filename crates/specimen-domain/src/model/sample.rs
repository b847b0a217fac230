//! Sample - A physical specimen moving from intake to collection
//!
//! A Sample is an Entity. It always belongs to exactly one Hospital and
//! exactly one Agent, and its assignment never changes.
//!
//! Lifecycle:
//!
//! ```text
//! PENDING ──collect──▶ COLLECTED (terminal)
//! ```

use super::agent::AgentId;
use super::hospital::{Hospital, HospitalId};
use super::timestamp::Timestamp;

/// Unique identifier for a Sample (assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleId(String);

impl SampleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl core::fmt::Display for SampleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a Sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleStatus {
    /// Registered, waiting for the agent to pick it up
    Pending,
    /// Physically collected by the assigned agent
    Collected,
}

impl SampleStatus {
    /// Wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleStatus::Pending => "PENDING",
            SampleStatus::Collected => "COLLECTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(SampleStatus::Pending),
            "COLLECTED" => Some(SampleStatus::Collected),
            _ => None,
        }
    }

    /// PENDING → COLLECTED is the only legal edge
    pub fn can_transition_to(&self, next: SampleStatus) -> bool {
        matches!((self, next), (SampleStatus::Pending, SampleStatus::Collected))
    }
}

impl core::fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intake request for a new sample, before the store assigns identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSample {
    pub patient_name: String,
    pub sample_type: String,
    pub hospital_id: HospitalId,
    pub agent_id: AgentId,
}

#[derive(Debug, Clone)]
pub struct Sample {
    id: SampleId,
    patient_name: String,
    sample_type: String,
    hospital_id: HospitalId,
    agent_id: AgentId,
    status: SampleStatus,
    created_at: Timestamp,
    collected_at: Option<Timestamp>,
}

impl Sample {
    /// Create a freshly registered sample in PENDING state
    pub fn pending(id: SampleId, new: NewSample, created_at: Timestamp) -> Self {
        Self {
            id,
            patient_name: new.patient_name,
            sample_type: new.sample_type,
            hospital_id: new.hospital_id,
            agent_id: new.agent_id,
            status: SampleStatus::Pending,
            created_at,
            collected_at: None,
        }
    }

    /// Rebuild a sample from persisted fields.
    ///
    /// Rejects combinations that break the `collected_at` invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: SampleId,
        patient_name: impl Into<String>,
        sample_type: impl Into<String>,
        hospital_id: HospitalId,
        agent_id: AgentId,
        status: SampleStatus,
        created_at: Timestamp,
        collected_at: Option<Timestamp>,
    ) -> Result<Self, SampleError> {
        match (status, collected_at) {
            (SampleStatus::Pending, None) | (SampleStatus::Collected, Some(_)) => Ok(Self {
                id,
                patient_name: patient_name.into(),
                sample_type: sample_type.into(),
                hospital_id,
                agent_id,
                status,
                created_at,
                collected_at,
            }),
            _ => Err(SampleError::InconsistentCollection { id: id.to_string() }),
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &SampleId {
        &self.id
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn sample_type(&self) -> &str {
        &self.sample_type
    }

    pub fn hospital_id(&self) -> &HospitalId {
        &self.hospital_id
    }

    pub fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }

    pub fn status(&self) -> SampleStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn collected_at(&self) -> Option<Timestamp> {
        self.collected_at
    }

    // ========== State Transitions ==========

    /// Mark the sample as collected at `at`.
    ///
    /// Ownership is not checked here; stores apply this only to rows that
    /// matched an [`OwnershipFilter`](crate::service::ownership::OwnershipFilter).
    pub fn collect(&mut self, at: Timestamp) -> Result<(), SampleError> {
        if !self.status.can_transition_to(SampleStatus::Collected) {
            return Err(SampleError::InvalidStateTransition {
                from: self.status,
                to: SampleStatus::Collected,
            });
        }
        self.status = SampleStatus::Collected;
        self.collected_at = Some(at);
        Ok(())
    }
}

impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sample {}

/// A sample joined with its hospital for read models. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleWithHospital {
    pub sample: Sample,
    pub hospital: Hospital,
}

/// Errors that can occur during Sample operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    InvalidStateTransition {
        from: SampleStatus,
        to: SampleStatus,
    },
    InconsistentCollection {
        id: String,
    },
}

impl core::fmt::Display for SampleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SampleError::InvalidStateTransition { from, to } => {
                write!(f, "Invalid state transition from {} to {}", from, to)
            }
            SampleError::InconsistentCollection { id } => {
                write!(f, "Sample {} has a collection timestamp that does not match its status", id)
            }
        }
    }
}
