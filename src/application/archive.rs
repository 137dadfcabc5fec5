//! Daily archive-then-clear rotation.

use tracing::{error, info, warn};

use super::ledger::DailyLedgerService;
use crate::domain::day::DayKey;
use crate::domain::id::RowPosition;
use crate::domain::settlement::ArchiveReport;
use crate::error::{ArchivePhase, Error, Result};
use crate::port::inbound::schedule::DailyTick;
use crate::port::outbound::ledger::{LedgerStore, TableCreation};

/// Copies a day's ledger into its archive table, then clears the live one.
///
/// The clear phase only runs after every row was copied. Just before the
/// clear the live table is read once more and rows appended during the copy
/// are archived too; only a row landing between that last read and the
/// clear itself is lost. Rerunning for the same day is safe: with the live
/// table already empty there is nothing to copy, and a failed snapshot
/// leaves the live table untouched so the next run copies it again.
pub struct ArchiveRotationService<S> {
    ledger: DailyLedgerService<S>,
}

/// Rows copied by one snapshot pass.
struct Copied {
    count: usize,
    last: Option<RowPosition>,
}

impl<S: LedgerStore> ArchiveRotationService<S> {
    pub fn new(ledger: DailyLedgerService<S>) -> Self {
        Self { ledger }
    }

    /// Archive and clear `day`, or today when no day is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Archive`] naming the phase that failed.
    pub async fn clear_daily_data(&self, day: Option<DayKey>) -> Result<ArchiveReport> {
        let day = day.unwrap_or_else(|| self.ledger.today());

        let first = self
            .snapshot(day, None)
            .await
            .map_err(|e| Error::archive(day, ArchivePhase::Snapshot, e))?;
        if first.count == 0 {
            info!(day = %day, "Nothing to archive");
            return Ok(ArchiveReport {
                archived_count: 0,
                cleared_count: 0,
            });
        }

        let late = self
            .snapshot(day, first.last)
            .await
            .map_err(|e| Error::archive(day, ArchivePhase::Snapshot, e))?;
        if late.count > 0 {
            info!(day = %day, rows = late.count, "Archived rows appended during rotation");
        }
        let archived_count = first.count + late.count;

        let cleared_count = self
            .ledger
            .store()
            .clear(&day.ledger_table())
            .await
            .map_err(|e| Error::archive(day, ArchivePhase::Clear, e))?;
        if cleared_count != archived_count {
            warn!(
                day = %day,
                archived = archived_count,
                cleared = cleared_count,
                "Live ledger changed between the last read and the clear"
            );
        }

        info!(day = %day, archived = archived_count, cleared = cleared_count, "Daily ledger archived");
        Ok(ArchiveReport {
            archived_count,
            cleared_count,
        })
    }

    /// Copy live rows past `after` into the archive table.
    async fn snapshot(&self, day: DayKey, after: Option<RowPosition>) -> Result<Copied> {
        let records: Vec<_> = self
            .ledger
            .records(day)
            .await?
            .into_iter()
            .filter(|r| after.map_or(true, |last| r.position > last))
            .collect();
        let Some(last) = records.iter().map(|r| r.position).max() else {
            return Ok(Copied {
                count: 0,
                last: after,
            });
        };

        let store = self.ledger.store();
        let archive = day.archive_table();
        if store.create_table(&archive).await? == TableCreation::AlreadyExists && after.is_none() {
            info!(day = %day, table = %archive, "Archive table exists, appending");
        }
        for record in &records {
            let mut entry = record.to_entry();
            entry.archived = true;
            store.append(&archive, &entry).await?;
        }
        Ok(Copied {
            count: records.len(),
            last: Some(last),
        })
    }
}

impl<S: LedgerStore> DailyTick for ArchiveRotationService<S> {
    async fn on_daily_tick(&self, day: DayKey) {
        if let Err(e) = self.clear_daily_data(Some(day)).await {
            error!(day = %day, error = %e, "Scheduled archive failed");
        }
    }
}
