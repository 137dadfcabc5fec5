//! Turning "message deleted" notices into cancelled wagers.

use std::sync::Arc;

use tracing::{debug, info};

use super::cache::MessageHistory;
use super::ledger::DailyLedgerService;
use crate::domain::day::DayKey;
use crate::domain::id::MessageId;
use crate::domain::settlement::CancellationOutcome;
use crate::domain::wager::WagerStatus;
use crate::error::Result;
use crate::port::outbound::ledger::LedgerStore;

/// Finds the single wager a deleted message referred to and cancels it.
///
/// Matching is on reconstructed text, so two players sending identical
/// text in the same pending window resolve to whichever was recorded last.
/// The store has no locks; a concurrent settlement between the scan and the
/// write is not detected.
pub struct CancellationResolver<S> {
    ledger: DailyLedgerService<S>,
    history: Arc<MessageHistory>,
}

impl<S: LedgerStore> CancellationResolver<S> {
    pub fn new(ledger: DailyLedgerService<S>, history: Arc<MessageHistory>) -> Self {
        Self { ledger, history }
    }

    /// Cancel the most recently recorded pending wager whose reconstructed
    /// text equals `original_text` (trimmed).
    ///
    /// # Errors
    ///
    /// Returns the store error if the ledger cannot be read or written.
    /// Finding nothing is [`CancellationOutcome::NotFound`], not an error.
    pub async fn resolve_cancellation(
        &self,
        day: DayKey,
        original_text: &str,
    ) -> Result<CancellationOutcome> {
        let wanted = original_text.trim();
        let target = self
            .ledger
            .records(day)
            .await?
            .into_iter()
            .filter(|r| r.is_pending() && r.reconstructed_text() == wanted)
            .max_by_key(|r| r.position);

        let Some(mut record) = target else {
            debug!(day = %day, text = wanted, "No pending wager matches deleted message");
            return Ok(CancellationOutcome::NotFound);
        };

        self.ledger
            .update_status(&record, WagerStatus::Cancelled)
            .await?;
        record.status = WagerStatus::Cancelled;
        info!(
            day = %day,
            position = %record.position,
            player = %record.player_name,
            "Wager cancelled"
        );
        Ok(CancellationOutcome::Cancelled(record))
    }

    /// Cancel the wager recorded from a chat message, given only its id.
    ///
    /// The message text and ledger day come from the message history. Ids
    /// that are unknown or already evicted resolve to `NotFound`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve_cancellation`].
    pub async fn resolve_deleted_message(&self, id: &MessageId) -> Result<CancellationOutcome> {
        let Some(entry) = self.history.take(id) else {
            debug!(message = %id, "Deleted message not in history");
            return Ok(CancellationOutcome::NotFound);
        };
        self.resolve_cancellation(entry.day, &entry.text).await
    }
}
