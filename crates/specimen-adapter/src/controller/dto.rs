//! JSON request and response bodies

use serde::{Deserialize, Serialize};
use specimen_domain::{Hospital, Sample, SampleWithHospital};
use specimen_usecase::CreateSample;

use crate::clock::to_rfc3339;

/// `POST /api/samples`
///
/// Missing fields deserialize as empty so the service reports which one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSampleBody {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub sample_type: String,
    #[serde(default)]
    pub hospital_id: String,
    #[serde(default)]
    pub agent_id: String,
}

impl From<CreateSampleBody> for CreateSample {
    fn from(body: CreateSampleBody) -> Self {
        Self {
            patient_name: body.patient_name,
            sample_type: body.sample_type,
            hospital_id: body.hospital_id,
            agent_id: body.agent_id,
        }
    }
}

/// `PATCH /api/samples/:id/collect`, used when no identity header is present
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectBody {
    #[serde(default)]
    pub agent_id: Option<String>,
}

/// `GET /api/samples?agentId=...`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub agent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalView {
    pub id: String,
    pub name: String,
    pub address: String,
}

impl From<&Hospital> for HospitalView {
    fn from(hospital: &Hospital) -> Self {
        Self {
            id: hospital.id().to_string(),
            name: hospital.name().to_string(),
            address: hospital.address().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleView {
    pub id: String,
    pub patient_name: String,
    pub sample_type: String,
    pub hospital_id: String,
    pub agent_id: String,
    pub status: String,
    pub created_at: String,
    pub collected_at: Option<String>,
}

impl From<&Sample> for SampleView {
    fn from(sample: &Sample) -> Self {
        Self {
            id: sample.id().to_string(),
            patient_name: sample.patient_name().to_string(),
            sample_type: sample.sample_type().to_string(),
            hospital_id: sample.hospital_id().to_string(),
            agent_id: sample.agent_id().to_string(),
            status: sample.status().as_str().to_string(),
            created_at: to_rfc3339(sample.created_at()),
            collected_at: sample.collected_at().map(to_rfc3339),
        }
    }
}

/// Sample with its hospital nested, as returned by the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleWithHospitalView {
    #[serde(flatten)]
    pub sample: SampleView,
    pub hospital: HospitalView,
}

impl From<&SampleWithHospital> for SampleWithHospitalView {
    fn from(row: &SampleWithHospital) -> Self {
        Self {
            sample: (&row.sample).into(),
            hospital: (&row.hospital).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
