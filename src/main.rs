//! `erp-sync`: runs one ERP product feed against the in-memory collaborators.
//!
//! Configuration comes from flags, `ERP_SYNC_*` environment variables and a
//! `.env` file; see [`erp_sync::config::Cli`].

use clap::Parser;
use erp_sync::config::Cli;
use erp_sync::engine::{OutputSink, TracingSink};
use erp_sync::feed::{load_feed, load_seed};
use erp_sync::lifecycle::{setup_tracing, SyncSystem};
use std::process::ExitCode;
use tracing::{error, info, info_span, Instrument};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    setup_tracing(cli.log_format);

    let sink = TracingSink;
    info!(feed = %cli.feed.display(), "Starting ERP product sync");

    let records = match load_feed(&cli.feed).await {
        Ok(records) => records,
        Err(e) => {
            sink.error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let system = SyncSystem::new();

    if let Some(seed_path) = &cli.seed {
        let seeded = match load_seed(seed_path).await {
            Ok(seed) => system.seed(seed).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = seeded {
            error!(seed = %seed_path.display(), "Seeding failed: {}", e);
            let _ = system.shutdown().await;
            return ExitCode::FAILURE;
        }
    }

    let config = cli.sync_config();
    let span = info_span!("batch", feed = %cli.feed.display());
    let summary = {
        let orchestrator = system.orchestrator(&config);
        orchestrator.run(&records, &sink).instrument(span).await
    };

    if let Err(e) = system.shutdown().await {
        error!("Shutdown failed: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        processed = summary.processed(),
        failures = summary.failures().len(),
        "ERP product sync finished"
    );
    ExitCode::SUCCESS
}
