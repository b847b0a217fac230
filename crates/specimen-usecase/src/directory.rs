//! DirectoryService - Hospitals and agents that samples refer to
//!
//! Registration is rare and mostly happens through seeding. Agents arrive
//! with ids issued by the identity provider; hospitals get store ids.

use specimen_domain::{
    Agent, AgentId, AgentRepository, Hospital, HospitalRepository, NewHospital, RepositoryError,
};
use tracing::info;

use crate::error::{Result, ServiceError};

/// Records created by [`DirectoryService::seed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFixture {
    pub hospital_name: String,
    pub hospital_address: String,
    pub agent_id: String,
    pub agent_name: String,
    pub agent_email: String,
}

impl Default for SeedFixture {
    fn default() -> Self {
        Self {
            hospital_name: "City General Hospital".to_string(),
            hospital_address: "123 Health St, Medville".to_string(),
            agent_id: "user_2fKkXqV6mJ8bN7pL9cR3aW4sY5z".to_string(),
            agent_name: "Test Agent".to_string(),
            agent_email: "agent-test@example.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub hospital: Hospital,
    pub agent: Agent,
}

pub struct DirectoryService<R> {
    store: R,
}

impl<R> DirectoryService<R>
where
    R: HospitalRepository + AgentRepository,
{
    pub fn new(store: R) -> Self {
        Self { store }
    }

    pub async fn register_hospital(&self, name: &str, address: &str) -> Result<Hospital> {
        let new = NewHospital {
            name: required("name", name)?,
            address: required("address", address)?,
        };

        let hospital = self.store.insert_hospital(new).await?;
        info!(hospital_id = %hospital.id(), name = hospital.name(), "hospital registered");
        Ok(hospital)
    }

    /// Return the hospital with this exact name and address, registering it if absent
    pub async fn ensure_hospital(&self, name: &str, address: &str) -> Result<Hospital> {
        let existing = self
            .store
            .list_hospitals()
            .await?
            .into_iter()
            .find(|h| h.name() == name.trim() && h.address() == address.trim());

        match existing {
            Some(hospital) => Ok(hospital),
            None => self.register_hospital(name, address).await,
        }
    }

    /// Register an agent under its identity-provider id.
    ///
    /// Registering an id that already exists returns the stored agent unchanged.
    pub async fn register_agent(&self, id: &str, name: &str, email: &str) -> Result<Agent> {
        let id = AgentId::new(required("id", id)?);
        let name = required("name", name)?;
        let email = required("email", email)?;
        if !is_plausible_email(&email) {
            return Err(ServiceError::Validation(format!("Invalid email address: {}.", email)));
        }

        if let Some(agent) = self.store.find_agent(&id).await? {
            return Ok(agent);
        }

        match self.store.insert_agent(Agent::new(id.clone(), name, email)).await {
            Ok(agent) => {
                info!(agent_id = %agent.id(), "agent registered");
                Ok(agent)
            }
            // Lost a race with a concurrent registration of the same id
            Err(RepositoryError::Duplicate { .. }) => self
                .store
                .find_agent(&id)
                .await?
                .ok_or_else(|| ServiceError::Infrastructure(format!("agent {} vanished", id))),
            Err(e) => Err(e.into()),
        }
    }

    /// Make sure the fixture's hospital and agent exist. Safe to run repeatedly.
    pub async fn seed(&self, fixture: &SeedFixture) -> Result<SeedReport> {
        let hospital = self
            .ensure_hospital(&fixture.hospital_name, &fixture.hospital_address)
            .await?;
        let agent = self
            .register_agent(&fixture.agent_id, &fixture.agent_name, &fixture.agent_email)
            .await?;

        info!(hospital_id = %hospital.id(), agent_id = %agent.id(), "seeding finished");
        Ok(SeedReport { hospital, agent })
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::missing_field(field));
    }
    Ok(trimmed.to_string())
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}
