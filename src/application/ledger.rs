//! Day-keyed ledger operations on top of the store port.

use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::day::DayKey;
use crate::domain::wager::{NewWager, WagerRecord, WagerStatus};
use crate::error::Result;
use crate::port::outbound::ledger::{LedgerColumn, LedgerStore};

/// A `(venue, competition code)` round that still has pending wagers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub venue: String,
    pub competition_code: String,
    pub pending_count: usize,
    pub pending_amount: i64,
}

/// Save, query and update one day's wagers.
///
/// Every day lives in its own table named after the day key. The service is
/// cheap to clone; clones share the store.
pub struct DailyLedgerService<S> {
    store: Arc<S>,
    offset: FixedOffset,
}

impl<S> Clone for DailyLedgerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            offset: self.offset,
        }
    }
}

impl<S: LedgerStore> DailyLedgerService<S> {
    /// `offset` decides which calendar day "today" is.
    pub fn new(store: Arc<S>, offset: FixedOffset) -> Self {
        Self { store, offset }
    }

    #[must_use]
    pub fn today(&self) -> DayKey {
        DayKey::today(self.offset)
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Append a validated wager to the day's ledger, creating the table on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns the store error if the table cannot be created or the row
    /// cannot be appended.
    pub async fn save(&self, day: DayKey, wager: NewWager) -> Result<WagerRecord> {
        let table = day.ledger_table();
        self.store.create_table(&table).await?;

        let entry = wager.into_entry(Utc::now());
        let position = self.store.append(&table, &entry).await?;
        info!(
            day = %day,
            position = %position,
            player = %entry.player_name,
            venue = %entry.venue,
            code = %entry.competition_code,
            amount = entry.amount,
            "Wager recorded"
        );
        Ok(WagerRecord::from_entry(position, day, entry))
    }

    /// Every wager of the day, in ledger order. A day with no table has none.
    ///
    /// # Errors
    ///
    /// Returns the store error if the table cannot be read.
    pub async fn records(&self, day: DayKey) -> Result<Vec<WagerRecord>> {
        self.store.read_all(&day.ledger_table()).await
    }

    /// Move a wager to a new status.
    ///
    /// # Errors
    ///
    /// Fails with a domain error if the wager is already settled or
    /// cancelled, or with the store error if the write fails.
    pub async fn update_status(&self, record: &WagerRecord, status: WagerStatus) -> Result<()> {
        record.ensure_mutable()?;
        self.store
            .update_cell(
                &record.day.ledger_table(),
                record.position,
                LedgerColumn::Status,
                status.as_str(),
            )
            .await?;
        debug!(day = %record.day, position = %record.position, status = %status, "Wager status updated");
        Ok(())
    }

    /// Write a settlement outcome onto a wager: its payout, then its status.
    ///
    /// The payout goes first so a wager never shows a terminal status
    /// without its payout.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_status`].
    pub async fn update_settlement(
        &self,
        record: &WagerRecord,
        status: WagerStatus,
        payout: Decimal,
    ) -> Result<()> {
        record.ensure_mutable()?;
        let table = record.day.ledger_table();
        self.store
            .update_cell(&table, record.position, LedgerColumn::Payout, &payout.to_string())
            .await?;
        self.store
            .update_cell(&table, record.position, LedgerColumn::Status, status.as_str())
            .await?;
        debug!(
            day = %record.day,
            position = %record.position,
            status = %status,
            payout = %payout,
            "Wager settled"
        );
        Ok(())
    }

    /// Rounds with at least one pending wager, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns the store error if the ledger cannot be read.
    pub async fn rounds(&self, day: DayKey) -> Result<Vec<Round>> {
        let records = self.records(day).await?;
        let mut rounds: Vec<Round> = Vec::new();
        for record in records.iter().filter(|r| r.is_pending()) {
            match rounds
                .iter_mut()
                .find(|r| record.in_round(&r.venue, &r.competition_code))
            {
                Some(round) => {
                    round.pending_count += 1;
                    round.pending_amount = round.pending_amount.saturating_add(record.amount);
                }
                None => rounds.push(Round {
                    venue: record.venue.clone(),
                    competition_code: record.competition_code.clone(),
                    pending_count: 1,
                    pending_amount: record.amount,
                }),
            }
        }
        Ok(rounds)
    }
}
