//! In-Memory Store
//!
//! One store implements every repository port, so referential integrity can
//! be checked under the same lock as the write it guards.
//!
//! Thread-safe implementation using RwLock. Every port method runs its lock
//! and any snapshot write inside `spawn_blocking`, so guards never meet an
//! `.await` and a slow disk never stalls a runtime worker.
//! Optionally mirrors its contents into a JSON [`SnapshotFile`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use specimen_domain::{
    Agent, AgentId, AgentRepository, Hospital, HospitalId, HospitalRepository, NewHospital,
    NewSample, OwnershipFilter, ReferenceKind, RepositoryError, Sample, SampleId,
    SampleRepository, SampleWithHospital, Timestamp,
};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::snapshot::{Snapshot, SnapshotError, SnapshotFile};

#[derive(Debug, Default)]
struct Tables {
    hospitals: HashMap<HospitalId, Hospital>,
    agents: HashMap<AgentId, Agent>,
    samples: HashMap<SampleId, Sample>,
}

impl Tables {
    fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot {
            hospitals: self.hospitals.values().map(Into::into).collect(),
            agents: self.agents.values().map(Into::into).collect(),
            samples: self.samples.values().map(Into::into).collect(),
        };
        // Deterministic file contents
        snapshot.hospitals.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot.agents.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot
            .samples
            .sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        snapshot
    }

    fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut tables = Tables::default();

        for record in snapshot.hospitals {
            let hospital = Hospital::from(record);
            tables.hospitals.insert(hospital.id().clone(), hospital);
        }
        for record in snapshot.agents {
            let agent = Agent::from(record);
            tables.agents.insert(agent.id().clone(), agent);
        }
        for record in snapshot.samples {
            let sample = Sample::try_from(record)?;
            if !tables.hospitals.contains_key(sample.hospital_id()) {
                return Err(SnapshotError::Corrupt(format!(
                    "sample {} references unknown hospital {}",
                    sample.id(),
                    sample.hospital_id()
                )));
            }
            if !tables.agents.contains_key(sample.agent_id()) {
                return Err(SnapshotError::Corrupt(format!(
                    "sample {} references unknown agent {}",
                    sample.id(),
                    sample.agent_id()
                )));
            }
            tables.samples.insert(sample.id().clone(), sample);
        }

        Ok(tables)
    }
}

/// In-memory store with optional snapshot persistence
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    snapshot: Option<Arc<SnapshotFile>>,
}

impl InMemoryStore {
    /// Purely in-memory store; contents are lost on drop
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by a snapshot file, loading it if present
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let file = SnapshotFile::new(path);
        let tables = match file.load()? {
            Some(snapshot) => Tables::from_snapshot(snapshot)?,
            None => Tables::default(),
        };

        info!(
            path = %file.path().display(),
            hospitals = tables.hospitals.len(),
            agents = tables.agents.len(),
            samples = tables.samples.len(),
            "store opened"
        );

        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
            snapshot: Some(Arc::new(file)),
        })
    }

    pub fn is_persistent(&self) -> bool {
        self.snapshot.is_some()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RepositoryError> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::unavailable("Failed to acquire read lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RepositoryError> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::unavailable("Failed to acquire write lock"))
    }

    /// Run `op` on the blocking pool.
    ///
    /// Lock waits and snapshot writes happen there, never on a runtime worker.
    async fn run_blocking<T, F>(&self, op: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&InMemoryStore) -> Result<T, RepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| RepositoryError::unavailable(format!("store task failed: {}", e)))?
    }

    /// Called with the write guard held, after the mutation
    fn persist(&self, tables: &Tables) -> Result<(), RepositoryError> {
        let Some(file) = &self.snapshot else {
            return Ok(());
        };

        file.save(&tables.to_snapshot()).map_err(|e| {
            error!(path = %file.path().display(), error = %e, "failed to write snapshot");
            RepositoryError::unavailable(e.to_string())
        })
    }
}

impl SampleRepository for InMemoryStore {
    async fn insert_sample(&self, new: NewSample, created_at: Timestamp) -> Result<Sample, RepositoryError> {
        self.run_blocking(move |store| {
            let mut tables = store.write()?;

            if !tables.hospitals.contains_key(&new.hospital_id) {
                return Err(RepositoryError::MissingReference {
                    kind: ReferenceKind::Hospital,
                    id: new.hospital_id.to_string(),
                });
            }
            if !tables.agents.contains_key(&new.agent_id) {
                return Err(RepositoryError::MissingReference {
                    kind: ReferenceKind::Agent,
                    id: new.agent_id.to_string(),
                });
            }

            let id = SampleId::new(Uuid::new_v4().to_string());
            let sample = Sample::pending(id.clone(), new, created_at);
            tables.samples.insert(id.clone(), sample.clone());

            if let Err(e) = store.persist(&tables) {
                tables.samples.remove(&id);
                return Err(e);
            }

            debug!(sample_id = %id, "sample inserted");
            Ok(sample)
        })
        .await
    }

    async fn find_sample(&self, id: &SampleId) -> Result<Option<Sample>, RepositoryError> {
        let id = id.clone();
        self.run_blocking(move |store| {
            let tables = store.read()?;
            Ok(tables.samples.get(&id).cloned())
        })
        .await
    }

    async fn find_by_agent_with_hospital(
        &self,
        agent_id: &AgentId,
    ) -> Result<Vec<SampleWithHospital>, RepositoryError> {
        let agent_id = agent_id.clone();
        self.run_blocking(move |store| {
            let tables = store.read()?;

            let mut rows = tables
                .samples
                .values()
                .filter(|s| s.agent_id() == &agent_id)
                .map(|s| -> Result<SampleWithHospital, RepositoryError> {
                    let hospital = tables.hospitals.get(s.hospital_id()).ok_or_else(|| {
                        RepositoryError::unavailable(format!(
                            "sample {} references unknown hospital {}",
                            s.id(),
                            s.hospital_id()
                        ))
                    })?;
                    Ok(SampleWithHospital {
                        sample: s.clone(),
                        hospital: hospital.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            rows.sort_by(|a, b| {
                (a.sample.created_at(), a.sample.id()).cmp(&(b.sample.created_at(), b.sample.id()))
            });
            Ok(rows)
        })
        .await
    }

    async fn collect_matching(
        &self,
        filter: &OwnershipFilter,
        collected_at: Timestamp,
    ) -> Result<u64, RepositoryError> {
        let filter = filter.clone();
        self.run_blocking(move |store| {
            let mut tables = store.write()?;

            // Ids are unique, so at most one row can match
            let Some(sample) = tables.samples.get_mut(filter.sample_id()) else {
                return Ok(0);
            };
            if !filter.matches(sample) {
                return Ok(0);
            }

            let before = sample.clone();
            sample
                .collect(collected_at)
                .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

            if let Err(e) = store.persist(&tables) {
                tables.samples.insert(before.id().clone(), before);
                return Err(e);
            }

            Ok(1)
        })
        .await
    }
}

impl HospitalRepository for InMemoryStore {
    async fn insert_hospital(&self, new: NewHospital) -> Result<Hospital, RepositoryError> {
        self.run_blocking(move |store| {
            let mut tables = store.write()?;

            let hospital = Hospital::from_new(HospitalId::new(Uuid::new_v4().to_string()), new);
            tables.hospitals.insert(hospital.id().clone(), hospital.clone());

            if let Err(e) = store.persist(&tables) {
                tables.hospitals.remove(hospital.id());
                return Err(e);
            }
            Ok(hospital)
        })
        .await
    }

    async fn list_hospitals(&self) -> Result<Vec<Hospital>, RepositoryError> {
        self.run_blocking(|store| {
            let tables = store.read()?;
            let mut hospitals: Vec<Hospital> = tables.hospitals.values().cloned().collect();
            hospitals.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
            Ok(hospitals)
        })
        .await
    }
}

impl AgentRepository for InMemoryStore {
    async fn insert_agent(&self, agent: Agent) -> Result<Agent, RepositoryError> {
        self.run_blocking(move |store| {
            let mut tables = store.write()?;

            if tables.agents.contains_key(agent.id()) {
                return Err(RepositoryError::Duplicate {
                    id: agent.id().to_string(),
                });
            }
            tables.agents.insert(agent.id().clone(), agent.clone());

            if let Err(e) = store.persist(&tables) {
                tables.agents.remove(agent.id());
                return Err(e);
            }
            Ok(agent)
        })
        .await
    }

    async fn find_agent(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        let id = id.clone();
        self.run_blocking(move |store| {
            let tables = store.read()?;
            Ok(tables.agents.get(&id).cloned())
        })
        .await
    }
}
