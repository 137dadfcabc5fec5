//! CLI module graph.

pub mod command;
pub mod config;
pub mod ledger;
pub mod output;
pub mod run;
pub mod wager;

use std::sync::Arc;

use crate::adapter::outbound::sqlite::SqliteLedgerStore;
use crate::error::Result;
use crate::infrastructure::bootstrap::{open_sqlite_store, Services};
use crate::infrastructure::config::Config;

use command::{Cli, Commands, ConfigCommand};

/// Run one parsed command line against `config`.
///
/// # Errors
///
/// Returns whatever the selected handler returns.
pub async fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Parse(args) => wager::execute_parse(config, args),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
        Commands::Config(ConfigCommand::Show) => config::execute_show(config),
        command => {
            let services = services(config)?;
            let day = cli.day.unwrap_or_else(|| services.ledger.today());
            match command {
                Commands::Record(args) => wager::execute_record(&services, args).await,
                Commands::List => ledger::execute_list(&services, day).await,
                Commands::Summary(args) => ledger::execute_summary(&services, day, args).await,
                Commands::Rounds => ledger::execute_rounds(&services, day).await,
                Commands::Settle(args) => ledger::execute_settle(&services, day, args).await,
                Commands::Cancel(args) => wager::execute_cancel(&services, day, args).await,
                Commands::Archive => ledger::execute_archive(&services, cli.day).await,
                Commands::Run => run::execute(services, config).await,
                Commands::Parse(_) | Commands::Config(_) => Ok(()),
            }
        }
    }
}

fn services(config: &Config) -> Result<Services<SqliteLedgerStore>> {
    let store = Arc::new(open_sqlite_store(config)?);
    Services::build(store, config)
}
