//! Wager records, their lifecycle status, and status-synonym normalization.
//!
//! A wager is created pending and moves at most once, either to a settled
//! state (`Win`/`Loss`) or to `Cancelled`. All three are terminal.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::day::DayKey;
use super::error::DomainError;
use super::id::{GroupId, PlayerId, RowPosition};

/// Lifecycle status of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WagerStatus {
    /// Recorded, not yet settled or cancelled.
    #[default]
    Pending,
    /// Settled as a winning wager.
    Win,
    /// Settled as a losing wager.
    Loss,
    /// Withdrawn by the player before settlement.
    Cancelled,
}

/// Spellings different writers have used for each status.
///
/// Matching is done on the trimmed, lowercased cell text.
const STATUS_SYNONYMS: &[(&str, WagerStatus)] = &[
    ("pending", WagerStatus::Pending),
    ("open", WagerStatus::Pending),
    ("รอ", WagerStatus::Pending),
    ("รอผล", WagerStatus::Pending),
    ("win", WagerStatus::Win),
    ("won", WagerStatus::Win),
    ("w", WagerStatus::Win),
    ("ชนะ", WagerStatus::Win),
    ("ได้", WagerStatus::Win),
    ("ถูก", WagerStatus::Win),
    ("loss", WagerStatus::Loss),
    ("lose", WagerStatus::Loss),
    ("lost", WagerStatus::Loss),
    ("l", WagerStatus::Loss),
    ("แพ้", WagerStatus::Loss),
    ("เสีย", WagerStatus::Loss),
    ("cancel", WagerStatus::Cancelled),
    ("cancelled", WagerStatus::Cancelled),
    ("canceled", WagerStatus::Cancelled),
    ("void", WagerStatus::Cancelled),
    ("ยกเลิก", WagerStatus::Cancelled),
    ("ยก", WagerStatus::Cancelled),
];

impl WagerStatus {
    /// Map any known spelling of a status onto its canonical value.
    ///
    /// Unrecognized text (including an empty cell) is treated as pending.
    /// Every read path goes through this one function.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        STATUS_SYNONYMS
            .iter()
            .find(|(spelling, _)| *spelling == key)
            .map_or(Self::Pending, |(_, status)| *status)
    }

    /// Canonical token written back to the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Cancelled => "cancelled",
        }
    }

    /// Settled and cancelled wagers never change again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for WagerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest stake a single wager may carry.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// A validated wager ready to be appended to a day's ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWager {
    player_name: String,
    player_id: Option<PlayerId>,
    venue: String,
    competition_code: String,
    amount: i64,
    group_id: Option<GroupId>,
}

impl NewWager {
    /// Validate and build a new wager.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveAmount`] when `amount <= 0`,
    /// [`DomainError::AmountTooLarge`] above [`MAX_AMOUNT`], and
    /// [`DomainError::EmptyField`] when any text field is blank.
    pub fn try_new(
        player_name: impl Into<String>,
        venue: impl Into<String>,
        competition_code: impl Into<String>,
        amount: i64,
    ) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::NonPositiveAmount { amount });
        }
        if amount > MAX_AMOUNT {
            return Err(DomainError::AmountTooLarge {
                amount,
                max: MAX_AMOUNT,
            });
        }
        let player_name = non_empty(player_name.into(), "player_name")?;
        let venue = non_empty(venue.into(), "venue")?;
        let competition_code = non_empty(competition_code.into(), "competition_code")?;

        Ok(Self {
            player_name,
            player_id: None,
            venue,
            competition_code,
            amount,
            group_id: None,
        })
    }

    /// Attach the chat-platform id of the player.
    #[must_use]
    pub fn with_player_id(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Attach the chat group the wager was placed in.
    #[must_use]
    pub fn with_group_id(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn venue(&self) -> &str {
        &self.venue
    }

    #[must_use]
    pub fn competition_code(&self) -> &str {
        &self.competition_code
    }

    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Turn the wager into the row that gets appended.
    #[must_use]
    pub fn into_entry(self, recorded_at: DateTime<Utc>) -> LedgerEntry {
        LedgerEntry {
            recorded_at,
            player_name: self.player_name,
            player_id: self.player_id,
            venue: self.venue,
            competition_code: self.competition_code,
            amount: self.amount,
            status: WagerStatus::Pending,
            group_id: self.group_id,
            payout: None,
            archived: false,
        }
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Typed content of one ledger row, without its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub recorded_at: DateTime<Utc>,
    pub player_name: String,
    pub player_id: Option<PlayerId>,
    pub venue: String,
    pub competition_code: String,
    pub amount: i64,
    pub status: WagerStatus,
    pub group_id: Option<GroupId>,
    pub payout: Option<Decimal>,
    pub archived: bool,
}

/// A wager as read back from a day's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerRecord {
    /// Row position, stable within the day.
    pub position: RowPosition,
    pub day: DayKey,
    pub recorded_at: DateTime<Utc>,
    pub player_name: String,
    pub player_id: Option<PlayerId>,
    pub venue: String,
    pub competition_code: String,
    pub amount: i64,
    pub status: WagerStatus,
    pub group_id: Option<GroupId>,
    /// Set once the wager's round is settled.
    pub payout: Option<Decimal>,
    /// True only for rows copied into an archive snapshot.
    pub archived: bool,
}

impl WagerRecord {
    /// Attach a position and day to a stored entry.
    #[must_use]
    pub fn from_entry(position: RowPosition, day: DayKey, entry: LedgerEntry) -> Self {
        Self {
            position,
            day,
            recorded_at: entry.recorded_at,
            player_name: entry.player_name,
            player_id: entry.player_id,
            venue: entry.venue,
            competition_code: entry.competition_code,
            amount: entry.amount,
            status: entry.status,
            group_id: entry.group_id,
            payout: entry.payout,
            archived: entry.archived,
        }
    }

    /// Copy of this record's cells, for re-appending elsewhere.
    #[must_use]
    pub fn to_entry(&self) -> LedgerEntry {
        LedgerEntry {
            recorded_at: self.recorded_at,
            player_name: self.player_name.clone(),
            player_id: self.player_id.clone(),
            venue: self.venue.clone(),
            competition_code: self.competition_code.clone(),
            amount: self.amount,
            status: self.status,
            group_id: self.group_id.clone(),
            payout: self.payout,
            archived: self.archived,
        }
    }

    /// Canonical text of the message that would have produced this wager.
    ///
    /// Venue immediately followed by the amount, e.g. `สนามชล200`. This is
    /// what deletion notifications are matched against.
    #[must_use]
    pub fn reconstructed_text(&self) -> String {
        format!("{}{}", self.venue, self.amount)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == WagerStatus::Pending
    }

    /// Whether this wager belongs to the round `(venue, competition_code)`.
    #[must_use]
    pub fn in_round(&self, venue: &str, competition_code: &str) -> bool {
        self.venue == venue.trim() && self.competition_code == competition_code.trim()
    }

    /// Fail if the wager can no longer change status.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TerminalStatus`] for settled or cancelled wagers.
    pub fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::TerminalStatus {
                position: self.position,
                status: self.status,
            });
        }
        Ok(())
    }
}
