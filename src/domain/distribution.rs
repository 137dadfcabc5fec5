//! Payout arithmetic for settling a round.
//!
//! Three interchangeable policies:
//!
//! - [`DistributionPolicy::Equal`]: the round's revenue is split evenly
//!   between winners, whatever each of them staked.
//! - [`DistributionPolicy::Proportional`]: winners get their stake back plus
//!   a share of the losers' pool weighted by stake.
//! - [`DistributionPolicy::Odds`]: winners get `stake × odds`.
//!
//! All functions here are pure. Monetary results are rounded to two
//! decimal places, midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::error::DomainError;

const MONEY_DP: u32 = 2;

/// Round a monetary value to two decimal places.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// One player's combined stake in a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stake {
    pub player_name: String,
    pub amount: i64,
}

impl Stake {
    pub fn new(player_name: impl Into<String>, amount: i64) -> Self {
        Self {
            player_name: player_name.into(),
            amount,
        }
    }
}

/// Sum of stakes, saturating at `i64::MAX`.
#[must_use]
pub fn total_stake(amounts: impl IntoIterator<Item = i64>) -> i64 {
    amounts.into_iter().fold(0, i64::saturating_add)
}

/// Outcome of the equal-split arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EqualSplit {
    pub payout_per_winner: Decimal,
    pub total_payout: Decimal,
    pub profit: Decimal,
}

/// Split `total_revenue` evenly over `winner_count` winners.
///
/// With no winners nothing is paid out and the whole revenue is profit.
#[must_use]
pub fn equal_distribution(total_revenue: i64, winner_count: usize) -> EqualSplit {
    let revenue = Decimal::from(total_revenue);
    if winner_count == 0 {
        return EqualSplit {
            payout_per_winner: Decimal::ZERO,
            total_payout: Decimal::ZERO,
            profit: round_money(revenue),
        };
    }

    let winners = Decimal::from(winner_count as u64);
    let payout_per_winner = round_money(revenue / winners);
    let total_payout = round_money(payout_per_winner * winners);
    EqualSplit {
        payout_per_winner,
        total_payout,
        profit: round_money(revenue - total_payout),
    }
}

/// Payout owed to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPayout {
    pub player_name: String,
    pub stake: i64,
    pub won: bool,
    pub payout: Decimal,
}

/// Result of distributing one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub total_revenue: i64,
    pub total_payout: Decimal,
    pub profit: Decimal,
    /// One entry per player, in stake order.
    pub payouts: Vec<PlayerPayout>,
}

impl Distribution {
    #[must_use]
    pub fn payout_for(&self, player_name: &str) -> Option<&PlayerPayout> {
        self.payouts.iter().find(|p| p.player_name == player_name)
    }

    #[must_use]
    pub fn winner_count(&self) -> usize {
        self.payouts.iter().filter(|p| p.won).count()
    }
}

/// Which payout rule a settlement applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "policy", content = "odds", rename_all = "lowercase")]
pub enum DistributionPolicy {
    /// Revenue split evenly between winners.
    #[default]
    Equal,
    /// Stake back plus a stake-weighted share of the losers' pool.
    Proportional,
    /// Stake multiplied by fixed odds.
    Odds(Decimal),
}

impl DistributionPolicy {
    /// Build an odds policy.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveOdds`] unless `odds > 0`.
    pub fn odds(odds: Decimal) -> Result<Self, DomainError> {
        if odds <= Decimal::ZERO {
            return Err(DomainError::NonPositiveOdds { odds });
        }
        Ok(Self::Odds(odds))
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Proportional => "proportional",
            Self::Odds(_) => "odds",
        }
    }

    /// Distribute a round between its players.
    ///
    /// `stakes` holds one entry per player; a player counts as a winner when
    /// their name is in `winners`. Winner names without a stake are ignored.
    #[must_use]
    pub fn distribute(&self, stakes: &[Stake], winners: &[String]) -> Distribution {
        let total_revenue = total_stake(stakes.iter().map(|s| s.amount));
        let is_winner = |stake: &Stake| winners.iter().any(|w| w.trim() == stake.player_name);

        let payouts: Vec<PlayerPayout> = match self {
            Self::Equal => {
                let winner_count = stakes.iter().filter(|s| is_winner(*s)).count();
                let split = equal_distribution(total_revenue, winner_count);
                stakes
                    .iter()
                    .map(|s| payout(s, is_winner(s), split.payout_per_winner))
                    .collect()
            }
            Self::Proportional => {
                let (winning, losing): (Vec<&Stake>, Vec<&Stake>) =
                    stakes.iter().partition(|s| is_winner(*s));
                let winners_stake = total_stake(winning.iter().map(|s| s.amount));
                let losers_pool = Decimal::from(total_stake(losing.iter().map(|s| s.amount)));

                stakes
                    .iter()
                    .map(|s| {
                        if !is_winner(s) || winners_stake == 0 {
                            return payout(s, is_winner(s), Decimal::ZERO);
                        }
                        let stake = Decimal::from(s.amount);
                        let share = losers_pool * (stake / Decimal::from(winners_stake));
                        payout(s, true, round_money(stake.saturating_add(share)))
                    })
                    .collect()
            }
            Self::Odds(odds) => stakes
                .iter()
                .map(|s| {
                    let won = is_winner(s);
                    let amount = if won {
                        round_money(Decimal::from(s.amount).saturating_mul(*odds))
                    } else {
                        Decimal::ZERO
                    };
                    payout(s, won, amount)
                })
                .collect(),
        };

        let total_payout = payouts
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.payout));
        Distribution {
            total_revenue,
            total_payout,
            profit: round_money(Decimal::from(total_revenue).saturating_sub(total_payout)),
            payouts,
        }
    }
}

fn payout(stake: &Stake, won: bool, amount: Decimal) -> PlayerPayout {
    PlayerPayout {
        player_name: stake.player_name.clone(),
        stake: stake.amount,
        won,
        payout: if won { amount } else { Decimal::ZERO },
    }
}
