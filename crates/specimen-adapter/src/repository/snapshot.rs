//! JSON snapshot persistence
//!
//! The whole store is written to a single JSON file after every successful
//! mutation. Writes go to a sibling temp file first and are renamed into
//! place, so a crash mid-write leaves the previous snapshot intact.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use specimen_domain::{
    Agent, AgentId, Hospital, HospitalId, Sample, SampleId, SampleStatus,
};
use thiserror::Error;

use crate::clock::{from_datetime, to_datetime};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRecord {
    pub id: String,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    pub id: String,
    pub patient_name: String,
    pub sample_type: String,
    pub hospital_id: String,
    pub agent_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub collected_at: Option<DateTime<Utc>>,
}

/// Full store contents as written to disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub hospitals: Vec<HospitalRecord>,
    #[serde(default)]
    pub agents: Vec<AgentRecord>,
    #[serde(default)]
    pub samples: Vec<SampleRecord>,
}

impl From<&Hospital> for HospitalRecord {
    fn from(hospital: &Hospital) -> Self {
        Self {
            id: hospital.id().to_string(),
            name: hospital.name().to_string(),
            address: hospital.address().to_string(),
        }
    }
}

impl From<HospitalRecord> for Hospital {
    fn from(record: HospitalRecord) -> Self {
        Hospital::new(HospitalId::new(record.id), record.name, record.address)
    }
}

impl From<&Agent> for AgentRecord {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id().to_string(),
            name: agent.name().to_string(),
            email: agent.email().to_string(),
        }
    }
}

impl From<AgentRecord> for Agent {
    fn from(record: AgentRecord) -> Self {
        Agent::new(AgentId::new(record.id), record.name, record.email)
    }
}

impl From<&Sample> for SampleRecord {
    fn from(sample: &Sample) -> Self {
        Self {
            id: sample.id().to_string(),
            patient_name: sample.patient_name().to_string(),
            sample_type: sample.sample_type().to_string(),
            hospital_id: sample.hospital_id().to_string(),
            agent_id: sample.agent_id().to_string(),
            status: sample.status().as_str().to_string(),
            created_at: to_datetime(sample.created_at()),
            collected_at: sample.collected_at().map(to_datetime),
        }
    }
}

impl TryFrom<SampleRecord> for Sample {
    type Error = SnapshotError;

    fn try_from(record: SampleRecord) -> Result<Self, Self::Error> {
        let status = SampleStatus::parse(&record.status).ok_or_else(|| {
            SnapshotError::Corrupt(format!("sample {} has unknown status {}", record.id, record.status))
        })?;

        Sample::restore(
            SampleId::new(record.id),
            record.patient_name,
            record.sample_type,
            HospitalId::new(record.hospital_id),
            AgentId::new(record.agent_id),
            status,
            from_datetime(&record.created_at),
            record.collected_at.as_ref().map(from_datetime),
        )
        .map_err(|e| SnapshotError::Corrupt(e.to_string()))
    }
}

/// Location of the snapshot on disk
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SnapshotError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let snapshot = serde_json::from_str(&content).map_err(|source| SnapshotError::Json {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(snapshot))
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|source| SnapshotError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
