//! In-memory test double for the repository ports

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use specimen_domain::{
    Agent, AgentId, AgentRepository, Hospital, HospitalId, HospitalRepository, NewHospital,
    NewSample, OwnershipFilter, ReferenceKind, RepositoryError, Sample, SampleId,
    SampleRepository, SampleWithHospital, Timestamp,
};

#[derive(Default)]
struct Tables {
    hospitals: HashMap<HospitalId, Hospital>,
    agents: HashMap<AgentId, Agent>,
    samples: Vec<Sample>,
    next_id: u64,
    unavailable: bool,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    tables: Arc<Mutex<Tables>>,
}

impl FakeStore {
    pub fn with_directory(hospitals: &[&str], agents: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut tables = store.tables.lock().unwrap();
            for id in hospitals {
                let hospital = Hospital::new(HospitalId::new(*id), format!("Hospital {}", id), "1 Main St");
                tables.hospitals.insert(hospital.id().clone(), hospital);
            }
            for id in agents {
                let agent = Agent::new(AgentId::new(*id), format!("Agent {}", id), format!("{}@example.com", id));
                tables.agents.insert(agent.id().clone(), agent);
            }
        }
        store
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.tables.lock().unwrap().unavailable = unavailable;
    }

    pub fn sample(&self, id: &SampleId) -> Option<Sample> {
        let tables = self.tables.lock().unwrap();
        tables.samples.iter().find(|s| s.id() == id).cloned()
    }

    pub fn hospital_count(&self) -> usize {
        self.tables.lock().unwrap().hospitals.len()
    }

    fn check(tables: &Tables) -> Result<(), RepositoryError> {
        if tables.unavailable {
            return Err(RepositoryError::unavailable("fake store offline"));
        }
        Ok(())
    }
}

impl SampleRepository for FakeStore {
    async fn insert_sample(&self, new: NewSample, created_at: Timestamp) -> Result<Sample, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        Self::check(&tables)?;
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
        tables.next_id += 1;
        let sample = Sample::pending(SampleId::new(format!("s-{:03}", tables.next_id)), new, created_at);
        tables.samples.push(sample.clone());
        Ok(sample)
    }

    async fn find_sample(&self, id: &SampleId) -> Result<Option<Sample>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Self::check(&tables)?;
        Ok(tables.samples.iter().find(|s| s.id() == id).cloned())
    }

    async fn find_by_agent_with_hospital(
        &self,
        agent_id: &AgentId,
    ) -> Result<Vec<SampleWithHospital>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Self::check(&tables)?;
        Ok(tables
            .samples
            .iter()
            .filter(|s| s.agent_id() == agent_id)
            .filter_map(|s| {
                tables.hospitals.get(s.hospital_id()).map(|h| SampleWithHospital {
                    sample: s.clone(),
                    hospital: h.clone(),
                })
            })
            .collect())
    }

    async fn collect_matching(
        &self,
        filter: &OwnershipFilter,
        collected_at: Timestamp,
    ) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        Self::check(&tables)?;
        let mut changed = 0;
        for sample in tables.samples.iter_mut().filter(|s| filter.matches(s)) {
            sample
                .collect(collected_at)
                .map_err(|e| RepositoryError::unavailable(e.to_string()))?;
            changed += 1;
        }
        Ok(changed)
    }
}

impl HospitalRepository for FakeStore {
    async fn insert_hospital(&self, new: NewHospital) -> Result<Hospital, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        Self::check(&tables)?;
        tables.next_id += 1;
        let hospital = Hospital::from_new(HospitalId::new(format!("h-{:03}", tables.next_id)), new);
        tables.hospitals.insert(hospital.id().clone(), hospital.clone());
        Ok(hospital)
    }

    async fn list_hospitals(&self) -> Result<Vec<Hospital>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Self::check(&tables)?;
        let mut hospitals: Vec<Hospital> = tables.hospitals.values().cloned().collect();
        hospitals.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(hospitals)
    }
}

impl AgentRepository for FakeStore {
    async fn insert_agent(&self, agent: Agent) -> Result<Agent, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        Self::check(&tables)?;
        if tables.agents.contains_key(agent.id()) {
            return Err(RepositoryError::Duplicate {
                id: agent.id().to_string(),
            });
        }
        tables.agents.insert(agent.id().clone(), agent.clone());
        Ok(agent)
    }

    async fn find_agent(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Self::check(&tables)?;
        Ok(tables.agents.get(id).cloned())
    }
}
