//! specimen serve command

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use specimen_adapter::clock::SystemClock;
use specimen_adapter::controller::{serve, AppState};
use specimen_usecase::{Clock, DirectoryService, SampleLifecycle, SeedFixture};
use tracing::{info, warn};

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Create the default hospital and agent before serving
    #[arg(long)]
    pub seed: bool,
}

impl ServeCommand {
    pub async fn run(&self, mut config: AppConfig) -> anyhow::Result<()> {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }

        let addr = config.socket_addr()?;
        let identity_header = config.identity_header()?;
        let store = open_store(&config)?;

        if self.seed {
            let report = DirectoryService::new(store.clone())
                .seed(&SeedFixture::default())
                .await
                .context("Failed to seed fixtures")?;
            info!(
                hospital_id = %report.hospital.id(),
                agent_id = %report.agent.id(),
                "fixtures ready"
            );
        }

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let state = AppState::new(SampleLifecycle::new(store, clock), identity_header.clone());

        info!(%addr, identity_header = %identity_header, "Sample Tracking API starting");
        serve(addr, state, shutdown_signal())
            .await
            .with_context(|| format!("HTTP server on {} failed", addr))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
