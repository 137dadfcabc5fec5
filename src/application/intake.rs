//! Chat message intake: parse, record, remember.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cache::{HistoryEntry, MessageHistory};
use super::ledger::DailyLedgerService;
use super::parser::WagerTextParser;
use crate::domain::id::{GroupId, MessageId, PlayerId};
use crate::domain::parse::ParseFailure;
use crate::domain::wager::WagerRecord;
use crate::error::Result;
use crate::port::outbound::ledger::LedgerStore;

/// An inbound chat message, already verified by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: MessageId,
    pub sender_name: Option<String>,
    pub sender_id: Option<PlayerId>,
    pub group_id: Option<GroupId>,
    pub text: Option<String>,
}

/// What happened to one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum IntakeOutcome {
    Recorded(WagerRecord),
    /// The text was not a complete wager. Callers usually reply with the
    /// missing fields.
    Rejected(ParseFailure),
    /// No text to look at (stickers, joins, edits without text).
    Ignored,
}

/// Turns chat messages into ledger rows for the current day.
pub struct WagerIntake<S> {
    parser: WagerTextParser,
    ledger: DailyLedgerService<S>,
    history: Arc<MessageHistory>,
}

impl<S: LedgerStore> WagerIntake<S> {
    pub fn new(
        parser: WagerTextParser,
        ledger: DailyLedgerService<S>,
        history: Arc<MessageHistory>,
    ) -> Self {
        Self {
            parser,
            ledger,
            history,
        }
    }

    /// Parse a message and, when it is a complete wager, record it.
    ///
    /// The sender's display name takes precedence over the name found in
    /// the text.
    ///
    /// # Errors
    ///
    /// Returns the store error if the wager cannot be saved. Parse failures
    /// are an [`IntakeOutcome`], not an error.
    pub async fn handle(&self, message: &ChatMessage) -> Result<IntakeOutcome> {
        let Some(text) = message.text.as_deref().filter(|t| !t.trim().is_empty()) else {
            return Ok(IntakeOutcome::Ignored);
        };

        let fields = match self.parser.parse(text) {
            Ok(fields) => fields,
            Err(failure) => {
                debug!(message = %message.message_id, reason = %failure, "Message is not a wager");
                return Ok(IntakeOutcome::Rejected(failure));
            }
        };

        let sender = message
            .sender_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let mut wager = fields.to_new_wager(sender)?;
        if let Some(id) = &message.sender_id {
            wager = wager.with_player_id(id.clone());
        }
        if let Some(id) = &message.group_id {
            wager = wager.with_group_id(id.clone());
        }

        let day = self.ledger.today();
        let record = self.ledger.save(day, wager).await?;
        self.history.record(
            message.message_id.clone(),
            HistoryEntry {
                text: record.reconstructed_text(),
                sender_name: record.player_name.clone(),
                day,
            },
        );
        Ok(IntakeOutcome::Recorded(record))
    }
}
