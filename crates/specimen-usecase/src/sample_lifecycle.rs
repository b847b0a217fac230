//! SampleLifecycle - The sole authority for creating and advancing samples
//!
//! The service keeps no state of its own between calls. Correctness of the
//! collection step rests entirely on the store's atomic
//! [`collect_matching`](SampleRepository::collect_matching).

use specimen_domain::{
    AgentId, HospitalId, NewSample, OwnershipFilter, Sample, SampleId, SampleRepository,
    SampleWithHospital,
};
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::error::{Result, ServiceError};

/// Intake request as received from the transport layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSample {
    pub patient_name: String,
    pub sample_type: String,
    pub hospital_id: String,
    pub agent_id: String,
}

impl CreateSample {
    /// Check required fields, in declaration order, and trim them
    fn validate(self) -> Result<NewSample> {
        let patient_name = required("patientName", self.patient_name)?;
        let sample_type = required("sampleType", self.sample_type)?;
        let hospital_id = required("hospitalId", self.hospital_id)?;
        let agent_id = required("agentId", self.agent_id)?;

        Ok(NewSample {
            patient_name,
            sample_type,
            hospital_id: HospitalId::new(hospital_id),
            agent_id: AgentId::new(agent_id),
        })
    }
}

fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::missing_field(field));
    }
    Ok(trimmed.to_string())
}

pub struct SampleLifecycle<R, C> {
    samples: R,
    clock: C,
}

impl<R, C> SampleLifecycle<R, C>
where
    R: SampleRepository,
    C: Clock,
{
    pub fn new(samples: R, clock: C) -> Self {
        Self { samples, clock }
    }

    /// Every sample assigned to `agent_id`, each with its hospital attached.
    ///
    /// An agent without samples gets an empty list, not an error.
    pub async fn list_by_agent(&self, agent_id: &AgentId) -> Result<Vec<SampleWithHospital>> {
        if agent_id.is_blank() {
            return Err(ServiceError::missing_field("agentId"));
        }

        let samples = self
            .samples
            .find_by_agent_with_hospital(agent_id)
            .await
            .map_err(|e| {
                error!(agent_id = %agent_id, error = %e, "failed to list samples");
                ServiceError::from(e)
            })?;

        debug!(agent_id = %agent_id, count = samples.len(), "listed samples");
        Ok(samples)
    }

    /// Register a new PENDING sample.
    ///
    /// Hospital and agent existence is checked by the store on insert.
    pub async fn create(&self, request: CreateSample) -> Result<Sample> {
        let new = request.validate()?;
        let created_at = self.clock.now();

        let sample = self
            .samples
            .insert_sample(new, created_at)
            .await
            .map_err(|e| {
                let err = ServiceError::from(e);
                if matches!(err, ServiceError::Infrastructure(_)) {
                    error!(error = %err, "failed to register sample");
                } else {
                    debug!(error = %err, "sample rejected");
                }
                err
            })?;

        info!(
            sample_id = %sample.id(),
            hospital_id = %sample.hospital_id(),
            agent_id = %sample.agent_id(),
            "sample registered"
        );
        Ok(sample)
    }

    /// Transition a sample from PENDING to COLLECTED on behalf of `agent_id`.
    ///
    /// Succeeds at most once per sample. Unknown ids, samples assigned to a
    /// different agent and already-collected samples all yield
    /// [`ServiceError::NotFoundOrForbidden`].
    pub async fn mark_collected(&self, sample_id: &SampleId, agent_id: &AgentId) -> Result<Sample> {
        if sample_id.is_blank() {
            return Err(ServiceError::missing_field("sampleId"));
        }
        if agent_id.is_blank() {
            return Err(ServiceError::missing_field("agentId"));
        }

        let filter = OwnershipFilter::collectable(sample_id.clone(), agent_id.clone());
        let collected_at = self.clock.now();

        let changed = self
            .samples
            .collect_matching(&filter, collected_at)
            .await
            .map_err(|e| {
                error!(sample_id = %sample_id, error = %e, "failed to collect sample");
                ServiceError::from(e)
            })?;

        if changed == 0 {
            warn!(sample_id = %sample_id, agent_id = %agent_id, "collection rejected");
            return Err(ServiceError::NotFoundOrForbidden);
        }

        let sample = self.samples.find_sample(sample_id).await?.ok_or_else(|| {
            error!(sample_id = %sample_id, "collected sample could not be re-read");
            ServiceError::Infrastructure(format!("sample {} vanished after collection", sample_id))
        })?;

        info!(sample_id = %sample_id, agent_id = %agent_id, "sample collected");
        Ok(sample)
    }
}
