//! Derived per-player and per-venue summaries of a day's ledger.
//!
//! Summaries are recomputed from the ledger on every request and never
//! persisted.

use serde::Serialize;

use super::wager::WagerStatus;

/// Count of wagers in each canonical status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub wins: usize,
    pub losses: usize,
    pub pending: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: WagerStatus) {
        match status {
            WagerStatus::Win => self.wins += 1,
            WagerStatus::Loss => self.losses += 1,
            WagerStatus::Pending => self.pending += 1,
            WagerStatus::Cancelled => self.cancelled += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.wins + self.losses + self.pending + self.cancelled
    }

    /// Wagers that still carry money, i.e. everything but cancellations.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.wins + self.losses + self.pending
    }
}

/// One player's activity at one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueBreakdown {
    pub venue: String,
    pub total_amount: i64,
    pub bet_count: usize,
}

/// Everything one player wagered during the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub player_name: String,
    /// Sum of non-cancelled stakes.
    pub total_amount: i64,
    /// Every wager, cancelled ones included.
    pub bet_count: usize,
    #[serde(flatten)]
    pub counts: StatusCounts,
    /// Venues in order of the player's first wager there.
    pub per_venue: Vec<VenueBreakdown>,
}

impl PlayerSummary {
    /// Average non-cancelled stake, rounded to the nearest whole unit.
    #[must_use]
    pub fn average_stake(&self) -> i64 {
        rounded_average(self.total_amount, self.counts.active())
    }
}

/// Everything wagered at one venue during the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub venue: String,
    pub total_amount: i64,
    pub bet_count: usize,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub distinct_players: usize,
}

impl VenueSummary {
    /// Average non-cancelled stake, rounded to the nearest whole unit.
    #[must_use]
    pub fn average_stake(&self) -> i64 {
        rounded_average(self.total_amount, self.counts.active())
    }
}

/// Summary of a whole day's ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub total_amount: i64,
    pub bet_count: usize,
    /// Players in order of first appearance in the ledger.
    pub by_player: Vec<PlayerSummary>,
    /// Venues in order of first appearance in the ledger.
    pub by_venue: Vec<VenueSummary>,
}

impl LedgerSummary {
    /// Status counts across every player.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        self.by_player
            .iter()
            .fold(StatusCounts::default(), |mut acc, player| {
                acc.wins += player.counts.wins;
                acc.losses += player.counts.losses;
                acc.pending += player.counts.pending;
                acc.cancelled += player.counts.cancelled;
                acc
            })
    }

    /// The `n` players with the largest total stake.
    ///
    /// Ties keep ledger order.
    #[must_use]
    pub fn top_players(&self, n: usize) -> Vec<&PlayerSummary> {
        let mut players: Vec<&PlayerSummary> = self.by_player.iter().collect();
        players.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        players.truncate(n);
        players
    }

    #[must_use]
    pub fn player(&self, name: &str) -> Option<&PlayerSummary> {
        self.by_player.iter().find(|p| p.player_name == name)
    }

    #[must_use]
    pub fn venue(&self, venue: &str) -> Option<&VenueSummary> {
        self.by_venue.iter().find(|v| v.venue == venue)
    }
}

/// Integer average rounded half away from zero; zero for an empty set.
fn rounded_average(total: i64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    let (total, count) = (i128::from(total), count as i128);
    let doubled = 2 * total + total.signum() * count;
    // The average of i64 values always fits back into an i64.
    i64::try_from(doubled / (2 * count)).unwrap_or(i64::MAX)
}
