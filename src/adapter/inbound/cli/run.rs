//! Handler for the `run` command.

use tokio::signal;
use tracing::{info, warn};

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::SqliteLedgerStore;
use crate::error::Result;
use crate::infrastructure::bootstrap::{archive_trigger, Services};
use crate::infrastructure::config::Config;

/// Run the daily archive scheduler in the foreground until Ctrl-C.
pub async fn execute(services: Services<SqliteLedgerStore>, config: &Config) -> Result<()> {
    if !config.archive.enabled {
        output::warning("Archive scheduling is disabled in the config");
        return Ok(());
    }

    let trigger = archive_trigger(config)?;
    output::section("wagerbook");
    output::field("Database", &config.ledger.database);
    output::field("Archive at", format!("{} ({})", config.archive.time, config.ledger.utc_offset));
    output::field("Policy", services.settlement.default_policy().name());

    let handle = trigger.spawn(services.archive);
    info!("Scheduler running");

    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
    handle.shutdown().await;
    output::success("Stopped");
    Ok(())
}
