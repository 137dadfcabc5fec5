//! Settlement results and cancellation outcomes.

use rust_decimal::Decimal;
use serde::Serialize;

use super::distribution::PlayerPayout;
use super::wager::WagerRecord;

/// What settling one round produced.
///
/// Not stored as its own entity; only the status and payout written onto
/// each affected wager persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementResult {
    pub venue: String,
    pub competition_code: String,
    /// Name of the distribution policy that was applied.
    pub policy: &'static str,
    pub total_revenue: i64,
    pub total_payout: Decimal,
    pub profit: Decimal,
    pub per_player_payout: Vec<PlayerPayout>,
    /// Number of ledger rows that were updated.
    pub settled_rows: usize,
}

/// Outcome of a settlement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SettlementOutcome {
    Settled(SettlementResult),
    /// No pending wager matched the round; nothing to do.
    NotFound,
}

impl SettlementOutcome {
    #[must_use]
    pub fn settled(&self) -> Option<&SettlementResult> {
        match self {
            Self::Settled(result) => Some(result),
            Self::NotFound => None,
        }
    }
}

/// Outcome of a cancellation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CancellationOutcome {
    /// The wager that was flipped to cancelled, as it now stands.
    Cancelled(WagerRecord),
    /// No pending wager matched; nothing to do.
    NotFound,
}

impl CancellationOutcome {
    #[must_use]
    pub fn cancelled(&self) -> Option<&WagerRecord> {
        match self {
            Self::Cancelled(record) => Some(record),
            Self::NotFound => None,
        }
    }
}

/// Outcome of one archive rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    pub archived_count: usize,
    /// Rows removed from the live ledger.
    pub cleared_count: usize,
}
