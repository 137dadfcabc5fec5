//! Ledger services backed by [`MemoryLedgerStore`].

use std::sync::Arc;

use chrono::FixedOffset;

use crate::adapter::outbound::memory::MemoryLedgerStore;
use crate::application::ledger::DailyLedgerService;
use crate::domain::day::DayKey;

use super::wager::wager;

/// A fresh memory store and a UTC ledger service over it.
///
/// The store handle is returned so tests can inject failures.
pub fn memory_ledger() -> (Arc<MemoryLedgerStore>, DailyLedgerService<MemoryLedgerStore>) {
    let store = Arc::new(MemoryLedgerStore::new());
    let offset = FixedOffset::east_opt(0).expect("UTC offset");
    let ledger = DailyLedgerService::new(Arc::clone(&store), offset);
    (store, ledger)
}

/// Record one wager per `(player, amount)` in the given round.
pub async fn seed_round(
    ledger: &DailyLedgerService<MemoryLedgerStore>,
    day: DayKey,
    venue: &str,
    code: &str,
    stakes: &[(&str, i64)],
) {
    for (player, amount) in stakes {
        ledger
            .save(day, wager(player, venue, code, *amount))
            .await
            .expect("seed wager");
    }
}
