//! Command-line interface definitions.
//!
//! Every ledger command works on one day: today in the configured offset
//! unless `--day` names another.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::domain::day::DayKey;
use crate::domain::distribution::DistributionPolicy;
use crate::domain::error::DomainError;

/// Chat wager ledger
#[derive(Parser, Debug)]
#[command(name = "wagerbook")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Ledger day to work on (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub day: Option<DayKey>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse wager text without recording it
    Parse(ParseArgs),

    /// Parse and record a wager for today
    Record(RecordArgs),

    /// List the day's wagers
    List,

    /// Totals per player and venue
    Summary(SummaryArgs),

    /// Rounds that still have pending wagers
    Rounds,

    /// Settle a round
    Settle(SettleArgs),

    /// Cancel the latest pending wager matching the text
    Cancel(CancelArgs),

    /// Archive the day's ledger and clear it
    Archive,

    /// Run the daily archive scheduler until interrupted
    Run,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration file.
    Validate,
    /// Display the effective configuration with defaults applied.
    Show,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Message text
    pub text: String,

    /// List every venue and code pair instead of one wager
    #[arg(long)]
    pub multiple: bool,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Message text
    pub text: String,

    /// Display name of the sender; overrides the name in the text
    #[arg(long)]
    pub sender: Option<String>,

    /// Chat message id
    #[arg(long)]
    pub message_id: Option<String>,

    /// Chat user id of the sender
    #[arg(long)]
    pub player_id: Option<String>,

    /// Chat group id
    #[arg(long)]
    pub group_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Show only the N biggest players
    #[arg(long)]
    pub top: Option<usize>,

    /// Show one player
    #[arg(long, conflicts_with = "top")]
    pub player: Option<String>,
}

#[derive(Args, Debug)]
pub struct SettleArgs {
    /// Venue of the round
    pub venue: String,

    /// Competition code of the round
    pub code: String,

    /// Winning players; none means everyone lost
    pub winners: Vec<String>,

    /// Payout rule; defaults to the configured one
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Odds for the odds policy
    #[arg(long, required_if_eq("policy", "odds"))]
    pub odds: Option<Decimal>,
}

impl SettleArgs {
    /// The policy requested on the command line, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveOdds`] for odds of zero or less.
    pub fn policy(&self) -> Result<Option<DistributionPolicy>, DomainError> {
        Ok(match self.policy {
            None => None,
            Some(PolicyArg::Equal) => Some(DistributionPolicy::Equal),
            Some(PolicyArg::Proportional) => Some(DistributionPolicy::Proportional),
            Some(PolicyArg::Odds) => Some(DistributionPolicy::odds(
                self.odds.unwrap_or(Decimal::ZERO),
            )?),
        })
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    Equal,
    Proportional,
    Odds,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Wager text as it appears in the ledger: venue, code, amount
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn day_flag_is_global() {
        let cli = Cli::try_parse_from(["wagerbook", "summary", "--day", "2026-03-02"]).unwrap();
        assert_eq!(cli.day.unwrap().to_string(), "2026-03-02");
    }

    #[test]
    fn odds_policy_needs_odds() {
        assert!(Cli::try_parse_from(["wagerbook", "settle", "v", "c", "--policy", "odds"]).is_err());

        let cli = Cli::try_parse_from([
            "wagerbook", "settle", "v", "c", "Lek", "--policy", "odds", "--odds", "1.9",
        ])
        .unwrap();
        let Commands::Settle(args) = cli.command else {
            panic!("expected settle");
        };
        assert_eq!(args.winners, vec!["Lek".to_string()]);
        assert_eq!(args.policy().unwrap(), Some(DistributionPolicy::Odds(dec!(1.9))));
    }
}
