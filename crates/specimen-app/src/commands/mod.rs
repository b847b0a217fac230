//! CLI Commands

pub mod seed;
pub mod serve;

pub use seed::SeedCommand;
pub use serve::ServeCommand;

use anyhow::Context;
use specimen_adapter::repository::InMemoryStore;
use tracing::warn;

use crate::config::AppConfig;

/// Open the configured store: snapshot-backed if a path is set, else in-memory
fn open_store(config: &AppConfig) -> anyhow::Result<InMemoryStore> {
    match &config.storage.snapshot_path {
        Some(path) => InMemoryStore::open(path)
            .with_context(|| format!("Failed to open snapshot {}", path.display())),
        None => {
            warn!("no snapshot path configured; data will be lost on exit");
            Ok(InMemoryStore::new())
        }
    }
}
