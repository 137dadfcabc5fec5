//! Composition root: builds every service from configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteLedgerStore};
use crate::application::aggregation::AggregationEngine;
use crate::application::archive::ArchiveRotationService;
use crate::application::cache::MessageHistory;
use crate::application::cancellation::CancellationResolver;
use crate::application::intake::WagerIntake;
use crate::application::ledger::DailyLedgerService;
use crate::application::parser::WagerTextParser;
use crate::application::settlement::SettlementService;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::infrastructure::scheduler::ScheduledArchiveTrigger;
use crate::port::outbound::ledger::LedgerStore;

/// Open the SQLite ledger named in the config, applying migrations.
///
/// # Errors
///
/// Returns [`Error::StoreUnavailable`](crate::error::Error) if the database
/// cannot be opened, or a store error if migrations fail.
pub fn open_sqlite_store(config: &Config) -> Result<SqliteLedgerStore> {
    let pool = create_pool(&config.ledger.database)?;
    run_migrations(&pool)?;
    info!(database = %config.ledger.database, "Ledger database ready");
    Ok(SqliteLedgerStore::new(pool))
}

/// Every service, wired to one store.
pub struct Services<S> {
    pub parser: WagerTextParser,
    pub ledger: DailyLedgerService<S>,
    pub aggregation: AggregationEngine,
    pub settlement: SettlementService<S>,
    pub cancellation: CancellationResolver<S>,
    pub archive: Arc<ArchiveRotationService<S>>,
    pub intake: WagerIntake<S>,
    pub history: Arc<MessageHistory>,
}

impl<S: LedgerStore> Services<S> {
    /// Wire services over `store` using the validated `config`.
    ///
    /// # Errors
    ///
    /// Returns a config error if the offset or settlement policy is invalid.
    pub fn build(store: Arc<S>, config: &Config) -> Result<Self> {
        let ledger = DailyLedgerService::new(store, config.ledger.offset()?);
        let parser = config.parser.build();
        let history = Arc::new(MessageHistory::new(config.history.capacity));

        Ok(Self {
            settlement: SettlementService::new(ledger.clone(), config.settlement.policy()?),
            cancellation: CancellationResolver::new(ledger.clone(), Arc::clone(&history)),
            archive: Arc::new(ArchiveRotationService::new(ledger.clone())),
            intake: WagerIntake::new(parser.clone(), ledger.clone(), Arc::clone(&history)),
            aggregation: AggregationEngine::new(),
            parser,
            ledger,
            history,
        })
    }
}

/// The daily archive trigger described by the config.
///
/// # Errors
///
/// Returns a config error if the fire time or offset is invalid.
pub fn archive_trigger(config: &Config) -> Result<ScheduledArchiveTrigger> {
    Ok(ScheduledArchiveTrigger::new(
        config.archive.fire_time()?,
        config.ledger.offset()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryLedgerStore;
    use crate::domain::distribution::DistributionPolicy;

    #[test]
    fn services_follow_the_config() {
        let config = Config::parse_toml(
            "[settlement]\npolicy = \"odds\"\nodds = 2.5\n[history]\ncapacity = 3\n",
        )
        .unwrap();
        let services = Services::build(Arc::new(MemoryLedgerStore::new()), &config).unwrap();

        assert_eq!(
            services.settlement.default_policy(),
            DistributionPolicy::Odds(rust_decimal_macros::dec!(2.5))
        );
        assert_eq!(services.ledger.offset().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn sqlite_store_opens_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.ledger.database = dir.path().join("ledger.db").display().to_string();

        assert!(open_sqlite_store(&config).is_ok());
        assert!(archive_trigger(&config).is_ok());
    }
}
