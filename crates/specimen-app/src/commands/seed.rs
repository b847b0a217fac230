//! specimen seed command

use anyhow::Context;
use clap::Args;
use specimen_usecase::{DirectoryService, SeedFixture};

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct SeedCommand {
    /// Hospital display name
    #[arg(long)]
    pub hospital_name: Option<String>,

    /// Hospital address
    #[arg(long)]
    pub hospital_address: Option<String>,

    /// Agent id as issued by the identity provider
    #[arg(long)]
    pub agent_id: Option<String>,

    /// Agent display name
    #[arg(long)]
    pub agent_name: Option<String>,

    /// Agent contact email
    #[arg(long)]
    pub agent_email: Option<String>,
}

impl SeedCommand {
    fn fixture(&self) -> SeedFixture {
        let defaults = SeedFixture::default();
        SeedFixture {
            hospital_name: self.hospital_name.clone().unwrap_or(defaults.hospital_name),
            hospital_address: self.hospital_address.clone().unwrap_or(defaults.hospital_address),
            agent_id: self.agent_id.clone().unwrap_or(defaults.agent_id),
            agent_name: self.agent_name.clone().unwrap_or(defaults.agent_name),
            agent_email: self.agent_email.clone().unwrap_or(defaults.agent_email),
        }
    }

    pub async fn run(&self, config: AppConfig) -> anyhow::Result<()> {
        let store = open_store(&config)?;
        let directory = DirectoryService::new(store);

        println!("Start seeding...");
        let report = directory
            .seed(&self.fixture())
            .await
            .context("Seeding failed")?;

        println!("Hospital: {} (ID: {})", report.hospital.name(), report.hospital.id());
        println!("Agent: {} (ID: {})", report.agent.name(), report.agent.id());
        println!("✓ Seeding finished");
        Ok(())
    }
}
