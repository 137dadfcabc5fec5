//! Recent chat messages keyed by message id.

use serde::Serialize;

use super::bounded::BoundedCache;
use crate::domain::day::DayKey;
use crate::domain::id::MessageId;

/// What is remembered about one recorded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Canonical text of the wager the message produced.
    pub text: String,
    pub sender_name: String,
    /// Ledger day the message was recorded under.
    pub day: DayKey,
}

/// Bounded history of recent wager messages.
///
/// Deletion notices from the chat transport carry only the message id;
/// this is where the original text is looked up.
#[derive(Debug)]
pub struct MessageHistory {
    entries: BoundedCache<MessageId, HistoryEntry>,
}

impl MessageHistory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BoundedCache::new(capacity),
        }
    }

    pub fn record(&self, id: MessageId, entry: HistoryEntry) {
        let evicted = self.entries.insert(id, entry);
        if !evicted.is_empty() {
            tracing::trace!(evicted = evicted.len(), "Message history full, dropped oldest");
        }
    }

    #[must_use]
    pub fn lookup(&self, id: &MessageId) -> Option<HistoryEntry> {
        self.entries.get(id)
    }

    /// Remove and return a message, so a repeated deletion notice is a no-op.
    pub fn take(&self, id: &MessageId) -> Option<HistoryEntry> {
        self.entries.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
