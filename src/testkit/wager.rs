//! Builders for wagers and day keys.

use crate::domain::day::DayKey;
use crate::domain::wager::NewWager;

/// A day key from `YYYY-MM-DD`.
pub fn day(s: &str) -> DayKey {
    s.parse().expect("valid day key")
}

/// A valid wager; panics on invalid input.
pub fn wager(player: &str, venue: &str, code: &str, amount: i64) -> NewWager {
    NewWager::try_new(player, venue, code, amount).expect("valid wager")
}
