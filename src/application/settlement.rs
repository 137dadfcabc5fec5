//! Settling a round: deciding winners and writing payouts back.

use rust_decimal::Decimal;
use tracing::info;

use super::ledger::DailyLedgerService;
use crate::domain::day::DayKey;
use crate::domain::distribution::{round_money, total_stake, DistributionPolicy, Stake};
use crate::domain::settlement::{SettlementOutcome, SettlementResult};
use crate::domain::wager::{WagerRecord, WagerStatus};
use crate::error::Result;
use crate::port::outbound::ledger::LedgerStore;

/// Resolves a `(venue, competition code)` round into wins, losses and
/// payouts.
///
/// Only pending wagers take part. A player with several wagers in the round
/// is one stake holder; their payout is spread over their wagers in
/// proportion to each wager's amount.
pub struct SettlementService<S> {
    ledger: DailyLedgerService<S>,
    default_policy: DistributionPolicy,
}

impl<S: LedgerStore> SettlementService<S> {
    pub fn new(ledger: DailyLedgerService<S>, default_policy: DistributionPolicy) -> Self {
        Self {
            ledger,
            default_policy,
        }
    }

    #[must_use]
    pub const fn default_policy(&self) -> DistributionPolicy {
        self.default_policy
    }

    /// Settle a round with the default policy.
    ///
    /// # Errors
    ///
    /// See [`Self::settle_with`].
    pub async fn settle(
        &self,
        day: DayKey,
        venue: &str,
        competition_code: &str,
        winners: &[String],
    ) -> Result<SettlementOutcome> {
        self.settle_with(day, venue, competition_code, winners, self.default_policy)
            .await
    }

    /// Settle a round with an explicit policy.
    ///
    /// Winner names that match no wager are ignored. With no winners every
    /// wager in the round loses and the whole revenue is profit.
    ///
    /// # Errors
    ///
    /// Returns the store error if the ledger cannot be read or a row cannot
    /// be written. Rows written before the failure stay settled; rerunning
    /// settles the rest.
    pub async fn settle_with(
        &self,
        day: DayKey,
        venue: &str,
        competition_code: &str,
        winners: &[String],
        policy: DistributionPolicy,
    ) -> Result<SettlementOutcome> {
        let records: Vec<WagerRecord> = self
            .ledger
            .records(day)
            .await?
            .into_iter()
            .filter(|r| r.is_pending() && r.in_round(venue, competition_code))
            .collect();
        if records.is_empty() {
            info!(day = %day, venue, code = competition_code, "No pending wagers in round");
            return Ok(SettlementOutcome::NotFound);
        }

        let stakes = combine_stakes(&records);
        let distribution = policy.distribute(&stakes, winners);

        for payout in &distribution.payouts {
            let status = if payout.won {
                WagerStatus::Win
            } else {
                WagerStatus::Loss
            };
            let own: Vec<&WagerRecord> = records
                .iter()
                .filter(|r| r.player_name == payout.player_name)
                .collect();
            for (record, amount) in own.iter().zip(spread(payout.payout, &own)) {
                self.ledger.update_settlement(record, status, amount).await?;
            }
        }

        info!(
            day = %day,
            venue,
            code = competition_code,
            policy = policy.name(),
            revenue = distribution.total_revenue,
            payout = %distribution.total_payout,
            profit = %distribution.profit,
            winners = distribution.winner_count(),
            "Round settled"
        );

        Ok(SettlementOutcome::Settled(SettlementResult {
            venue: venue.trim().to_string(),
            competition_code: competition_code.trim().to_string(),
            policy: policy.name(),
            total_revenue: distribution.total_revenue,
            total_payout: distribution.total_payout,
            profit: distribution.profit,
            per_player_payout: distribution.payouts,
            settled_rows: records.len(),
        }))
    }
}

/// One stake per player, in order of their first wager.
fn combine_stakes(records: &[WagerRecord]) -> Vec<Stake> {
    let mut stakes: Vec<Stake> = Vec::new();
    for record in records {
        match stakes.iter_mut().find(|s| s.player_name == record.player_name) {
            Some(stake) => stake.amount = stake.amount.saturating_add(record.amount),
            None => stakes.push(Stake::new(record.player_name.clone(), record.amount)),
        }
    }
    stakes
}

/// Split a player's payout over their wagers by amount. The last wager
/// absorbs the rounding remainder so the parts sum to `total`.
fn spread(total: Decimal, records: &[&WagerRecord]) -> Vec<Decimal> {
    let stake = total_stake(records.iter().map(|r| r.amount));
    if stake == 0 {
        return vec![Decimal::ZERO; records.len()];
    }

    let mut parts = Vec::with_capacity(records.len());
    let mut assigned = Decimal::ZERO;
    for (i, record) in records.iter().enumerate() {
        let part = if i + 1 == records.len() {
            total - assigned
        } else {
            round_money(total * (Decimal::from(record.amount) / Decimal::from(stake)))
        };
        assigned += part;
        parts.push(part);
    }
    parts
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::FixedOffset;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::adapter::outbound::memory::MemoryLedgerStore;
    use crate::domain::wager::NewWager;

    fn day() -> DayKey {
        "2026-03-02".parse().unwrap()
    }

    fn setup() -> (DailyLedgerService<MemoryLedgerStore>, SettlementService<MemoryLedgerStore>) {
        let ledger = DailyLedgerService::new(
            Arc::new(MemoryLedgerStore::new()),
            FixedOffset::east_opt(0).unwrap(),
        );
        let service = SettlementService::new(ledger.clone(), DistributionPolicy::Equal);
        (ledger, service)
    }

    async fn bet(ledger: &DailyLedgerService<MemoryLedgerStore>, player: &str, amount: i64) {
        ledger
            .save(day(), NewWager::try_new(player, "ท", "310-35", amount).unwrap())
            .await
            .unwrap();
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn single_winner_takes_the_whole_round() {
        let (ledger, service) = setup();
        bet(&ledger, "p1", 100).await;
        bet(&ledger, "p2", 200).await;
        bet(&ledger, "p3", 300).await;

        let outcome = service
            .settle(day(), "ท", "310-35", &names(&["p1"]))
            .await
            .unwrap();
        let result = outcome.settled().unwrap();
        assert_eq!(result.total_revenue, 600);
        assert_eq!(result.total_payout, dec!(600));
        assert_eq!(result.profit, dec!(0));
        assert_eq!(result.settled_rows, 3);

        let records = ledger.records(day()).await.unwrap();
        assert_eq!(records[0].status, WagerStatus::Win);
        assert_eq!(records[0].payout, Some(dec!(600)));
        assert_eq!(records[1].status, WagerStatus::Loss);
        assert_eq!(records[2].payout, Some(dec!(0)));
    }

    #[tokio::test]
    async fn no_winners_means_everything_is_profit() {
        let (ledger, service) = setup();
        bet(&ledger, "p1", 100).await;
        bet(&ledger, "p2", 200).await;

        let outcome = service
            .settle(day(), "ท", "310-35", &names(&["nobody"]))
            .await
            .unwrap();
        let result = outcome.settled().unwrap();
        assert_eq!(result.profit, dec!(300));
        assert_eq!(result.total_payout, dec!(0));

        let records = ledger.records(day()).await.unwrap();
        assert!(records.iter().all(|r| r.status == WagerStatus::Loss));
    }

    #[tokio::test]
    async fn settled_rounds_are_not_found_again() {
        let (ledger, service) = setup();
        bet(&ledger, "p1", 100).await;
        service.settle(day(), "ท", "310-35", &[]).await.unwrap();

        let again = service.settle(day(), "ท", "310-35", &[]).await.unwrap();
        assert_eq!(again, SettlementOutcome::NotFound);
        let other = service.settle(day(), "ท", "999", &[]).await.unwrap();
        assert_eq!(other, SettlementOutcome::NotFound);
    }

    #[tokio::test]
    async fn payout_is_spread_over_a_players_wagers() {
        let (ledger, service) = setup();
        bet(&ledger, "p1", 100).await;
        bet(&ledger, "p1", 200).await;
        bet(&ledger, "p2", 300).await;

        let outcome = service
            .settle_with(
                day(),
                "ท",
                "310-35",
                &names(&["p1"]),
                DistributionPolicy::Proportional,
            )
            .await
            .unwrap();
        assert_eq!(outcome.settled().unwrap().total_payout, dec!(600));

        let records = ledger.records(day()).await.unwrap();
        assert_eq!(records[0].payout, Some(dec!(200)));
        assert_eq!(records[1].payout, Some(dec!(400)));
    }

    #[test]
    fn spread_keeps_the_total_exact() {
        let day = day();
        let make = |amount| {
            WagerRecord::from_entry(
                crate::domain::id::RowPosition::new(1),
                day,
                NewWager::try_new("p", "v", "c", amount)
                    .unwrap()
                    .into_entry(chrono::Utc::now()),
            )
        };
        let records = [make(1), make(1), make(1)];
        let refs: Vec<&WagerRecord> = records.iter().collect();

        let parts = spread(dec!(100), &refs);
        assert_eq!(parts, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
    }
}
