//! Handlers for the day's ledger: `list`, `summary`, `rounds`, `settle`
//! and `archive`.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{SettleArgs, SummaryArgs};
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::SqliteLedgerStore;
use crate::domain::day::DayKey;
use crate::domain::settlement::SettlementOutcome;
use crate::domain::summary::PlayerSummary;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

#[derive(Tabled)]
struct WagerRow {
    #[tabled(rename = "#")]
    position: u32,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Venue")]
    venue: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Amount")]
    amount: i64,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Payout")]
    payout: String,
}

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Total")]
    total: i64,
    #[tabled(rename = "Bets")]
    bets: usize,
    #[tabled(rename = "Avg")]
    average: i64,
    #[tabled(rename = "W/L/P/C")]
    counts: String,
}

impl From<&PlayerSummary> for PlayerRow {
    fn from(player: &PlayerSummary) -> Self {
        let c = player.counts;
        Self {
            player: player.player_name.clone(),
            total: player.total_amount,
            bets: player.bet_count,
            average: player.average_stake(),
            counts: format!("{}/{}/{}/{}", c.wins, c.losses, c.pending, c.cancelled),
        }
    }
}

#[derive(Tabled)]
struct VenueRow {
    #[tabled(rename = "Venue")]
    venue: String,
    #[tabled(rename = "Total")]
    total: i64,
    #[tabled(rename = "Bets")]
    bets: usize,
    #[tabled(rename = "Players")]
    players: usize,
}

#[derive(Tabled)]
struct RoundRow {
    #[tabled(rename = "Venue")]
    venue: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Pending")]
    pending: usize,
    #[tabled(rename = "Amount")]
    amount: i64,
}

#[derive(Tabled)]
struct PayoutRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Stake")]
    stake: i64,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Payout")]
    payout: String,
}

fn render<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Execute `list`.
pub async fn execute_list(services: &Services<SqliteLedgerStore>, day: DayKey) -> Result<()> {
    let records = services.ledger.records(day).await?;
    if output::is_json() {
        return output::json_output("list", &json!({ "day": day, "wagers": records }));
    }

    output::section(&format!("Wagers for {day}"));
    if records.is_empty() {
        output::note("(no wagers)");
        return Ok(());
    }
    let offset = services.ledger.offset();
    output::table(&render(records.iter().map(|r| WagerRow {
        position: r.position.get(),
        time: r.recorded_at.with_timezone(&offset).format("%H:%M:%S").to_string(),
        player: r.player_name.clone(),
        venue: r.venue.clone(),
        code: r.competition_code.clone(),
        amount: r.amount,
        status: r.status.as_str(),
        payout: r.payout.map(|p| p.to_string()).unwrap_or_default(),
    })));
    Ok(())
}

/// Execute `summary`.
pub async fn execute_summary(
    services: &Services<SqliteLedgerStore>,
    day: DayKey,
    args: &SummaryArgs,
) -> Result<()> {
    let records = services.ledger.records(day).await?;
    let summary = services.aggregation.summarize(&records);

    if let Some(name) = &args.player {
        let player = summary.player(name);
        if output::is_json() {
            return output::json_output("summary", &json!({ "day": day, "player": player }));
        }
        match player {
            Some(player) => {
                output::section(&format!("{name} on {day}"));
                output::table(&render([PlayerRow::from(player)]));
            }
            None => output::warning(&format!("No wagers from {name} on {day}")),
        }
        return Ok(());
    }

    let players = match args.top {
        Some(n) => summary.top_players(n),
        None => summary.by_player.iter().collect(),
    };

    if output::is_json() {
        return output::json_output(
            "summary",
            &json!({
                "day": day,
                "total_amount": summary.total_amount,
                "bet_count": summary.bet_count,
                "status_counts": summary.status_counts(),
                "by_player": players,
                "by_venue": summary.by_venue,
            }),
        );
    }

    let counts = summary.status_counts();
    output::section(&format!("Summary for {day}"));
    output::field("Total", output::highlight(summary.total_amount));
    output::field("Bets", summary.bet_count);
    output::field(
        "Won / lost",
        format!(
            "{} / {}",
            output::positive(counts.wins),
            output::negative(counts.losses)
        ),
    );
    output::field("Pending", counts.pending);
    output::field("Cancelled", output::muted(counts.cancelled));

    if players.is_empty() {
        output::note("(no wagers)");
        return Ok(());
    }
    output::section("Players");
    output::table(&render(players.into_iter().map(PlayerRow::from)));
    output::section("Venues");
    output::table(&render(summary.by_venue.iter().map(|v| VenueRow {
        venue: v.venue.clone(),
        total: v.total_amount,
        bets: v.bet_count,
        players: v.distinct_players,
    })));
    Ok(())
}

/// Execute `rounds`.
pub async fn execute_rounds(services: &Services<SqliteLedgerStore>, day: DayKey) -> Result<()> {
    let rounds = services.ledger.rounds(day).await?;
    if output::is_json() {
        return output::json_output("rounds", &json!({ "day": day, "rounds": rounds }));
    }

    output::section(&format!("Open rounds for {day}"));
    if rounds.is_empty() {
        output::note("(nothing pending)");
        return Ok(());
    }
    output::table(&render(rounds.into_iter().map(|r| RoundRow {
        venue: r.venue,
        code: r.competition_code,
        pending: r.pending_count,
        amount: r.pending_amount,
    })));
    Ok(())
}

/// Execute `settle`.
pub async fn execute_settle(
    services: &Services<SqliteLedgerStore>,
    day: DayKey,
    args: &SettleArgs,
) -> Result<()> {
    let policy = args
        .policy()?
        .unwrap_or_else(|| services.settlement.default_policy());
    let outcome = services
        .settlement
        .settle_with(day, &args.venue, &args.code, &args.winners, policy)
        .await?;

    if output::is_json() {
        return output::json_output("settle", &outcome);
    }

    let SettlementOutcome::Settled(result) = outcome else {
        output::warning(&format!(
            "No pending wagers for {} {} on {day}",
            args.venue, args.code
        ));
        return Ok(());
    };

    output::success(&format!(
        "Settled {} {} ({} rows, {} policy)",
        result.venue, result.competition_code, result.settled_rows, result.policy
    ));
    output::field("Revenue", result.total_revenue);
    output::field("Payout", result.total_payout);
    let profit = if result.profit.is_sign_negative() {
        output::negative(result.profit)
    } else {
        output::positive(result.profit)
    };
    output::field("Profit", profit);
    output::table(&render(result.per_player_payout.iter().map(|p| PayoutRow {
        player: p.player_name.clone(),
        stake: p.stake,
        result: if p.won {
            output::positive("win")
        } else {
            output::negative("loss")
        },
        payout: p.payout.to_string(),
    })));
    Ok(())
}

/// Execute `archive`.
pub async fn execute_archive(
    services: &Services<SqliteLedgerStore>,
    day: Option<DayKey>,
) -> Result<()> {
    let day = day.unwrap_or_else(|| services.ledger.today());
    let report = services.archive.clear_daily_data(Some(day)).await?;

    if output::is_json() {
        return output::json_output("archive", &json!({ "day": day, "report": report }));
    }
    if report.archived_count == 0 {
        output::note(&format!("Nothing to archive for {day}"));
        return Ok(());
    }
    output::success(&format!("Archived {day}"));
    output::field("Archived", report.archived_count);
    output::field("Cleared", report.cleared_count);
    Ok(())
}
