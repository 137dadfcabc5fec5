//! Per-player and per-venue summaries of a day's ledger.

use std::collections::{HashMap, HashSet};

use crate::domain::summary::{
    LedgerSummary, PlayerSummary, StatusCounts, VenueBreakdown, VenueSummary,
};
use crate::domain::wager::{WagerRecord, WagerStatus};

/// Builds [`LedgerSummary`] values from wager records.
///
/// Players are grouped by name, not id, since older rows carry no id.
/// Output keeps ledger order. Cancelled wagers count toward `bet_count`
/// and the status counts but not toward any amount. Totals saturate at
/// `i64::MAX` rather than overflow on corrupt rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationEngine;

impl AggregationEngine {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn summarize(&self, records: &[WagerRecord]) -> LedgerSummary {
        let mut summary = LedgerSummary::default();
        let mut player_index: HashMap<&str, usize> = HashMap::new();
        let mut venue_index: HashMap<&str, usize> = HashMap::new();
        let mut venue_players: Vec<HashSet<&str>> = Vec::new();

        for record in records {
            let status = record.status;
            let stake = if status == WagerStatus::Cancelled {
                0
            } else {
                record.amount
            };

            summary.bet_count += 1;
            summary.total_amount = summary.total_amount.saturating_add(stake);

            let p = *player_index
                .entry(record.player_name.as_str())
                .or_insert_with(|| {
                    summary.by_player.push(PlayerSummary {
                        player_name: record.player_name.clone(),
                        total_amount: 0,
                        bet_count: 0,
                        counts: StatusCounts::default(),
                        per_venue: Vec::new(),
                    });
                    summary.by_player.len() - 1
                });
            let player = &mut summary.by_player[p];
            player.total_amount = player.total_amount.saturating_add(stake);
            player.bet_count += 1;
            player.counts.record(status);
            match player.per_venue.iter_mut().find(|v| v.venue == record.venue) {
                Some(breakdown) => {
                    breakdown.total_amount = breakdown.total_amount.saturating_add(stake);
                    breakdown.bet_count += 1;
                }
                None => player.per_venue.push(VenueBreakdown {
                    venue: record.venue.clone(),
                    total_amount: stake,
                    bet_count: 1,
                }),
            }

            let v = *venue_index.entry(record.venue.as_str()).or_insert_with(|| {
                summary.by_venue.push(VenueSummary {
                    venue: record.venue.clone(),
                    total_amount: 0,
                    bet_count: 0,
                    counts: StatusCounts::default(),
                    distinct_players: 0,
                });
                venue_players.push(HashSet::new());
                summary.by_venue.len() - 1
            });
            let venue = &mut summary.by_venue[v];
            venue.total_amount = venue.total_amount.saturating_add(stake);
            venue.bet_count += 1;
            venue.counts.record(status);
            if venue_players[v].insert(record.player_name.as_str()) {
                venue.distinct_players += 1;
            }
        }

        summary
    }
}
