//! Results of parsing free-text wager messages.

use std::fmt;

use serde::Serialize;

use super::error::DomainError;
use super::wager::NewWager;

/// A field the parser must recover for a message to count as a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WagerField {
    PlayerName,
    Amount,
    CompetitionCode,
    Venue,
}

impl WagerField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlayerName => "player_name",
            Self::Amount => "amount",
            Self::CompetitionCode => "competition_code",
            Self::Venue => "venue",
        }
    }
}

impl fmt::Display for WagerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every field of a successfully parsed wager message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WagerFields {
    /// Name candidate found in the text; the sender's display name wins
    /// when the transport provides one.
    pub player_name: String,
    pub amount: i64,
    pub competition_code: String,
    pub venue: String,
}

impl WagerFields {
    /// Build a ledger-ready wager, optionally overriding the player name.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the override name is blank.
    pub fn to_new_wager(&self, player_name: Option<&str>) -> Result<NewWager, DomainError> {
        NewWager::try_new(
            player_name.unwrap_or(&self.player_name),
            self.venue.clone(),
            self.competition_code.clone(),
            self.amount,
        )
    }
}

/// Why a message could not be turned into a wager.
///
/// Always returned as a value. It lists every missing field, not just the
/// first one found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub missing_fields: Vec<WagerField>,
    pub reason: String,
}

impl ParseFailure {
    #[must_use]
    pub fn new(missing_fields: Vec<WagerField>, reason: impl Into<String>) -> Self {
        Self {
            missing_fields,
            reason: reason.into(),
        }
    }

    /// Whether `field` is among the missing ones.
    #[must_use]
    pub fn is_missing(&self, field: WagerField) -> bool {
        self.missing_fields.contains(&field)
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.missing_fields.iter().map(|f| f.as_str()).collect();
        if fields.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{} (missing: {})", self.reason, fields.join(", "))
        }
    }
}

/// A `(venue, competition code)` pair found by multi-wager scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueCode {
    pub venue: String,
    pub competition_code: String,
}
