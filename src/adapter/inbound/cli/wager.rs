//! Handlers for `parse`, `record` and `cancel`.

use chrono::Utc;
use serde_json::json;

use crate::adapter::inbound::cli::command::{CancelArgs, ParseArgs, RecordArgs};
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::SqliteLedgerStore;
use crate::application::intake::{ChatMessage, IntakeOutcome};
use crate::domain::day::DayKey;
use crate::domain::id::{GroupId, MessageId, PlayerId};
use crate::domain::parse::ParseFailure;
use crate::domain::settlement::CancellationOutcome;
use crate::domain::wager::WagerRecord;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::Config;

/// Execute `parse`. Needs no database.
pub fn execute_parse(config: &Config, args: &ParseArgs) -> Result<()> {
    let parser = config.parser.build();

    if args.multiple {
        let pairs = parser.parse_multiple(&args.text);
        if output::is_json() {
            return output::json_output("parse", &json!({ "pairs": pairs }));
        }
        output::section("Venue and code pairs");
        if pairs.is_empty() {
            output::note("(none found)");
        }
        for pair in &pairs {
            output::field(&pair.venue, &pair.competition_code);
        }
        return Ok(());
    }

    match parser.parse(&args.text) {
        Ok(fields) => {
            if output::is_json() {
                return output::json_output("parse", &json!({ "ok": true, "wager": fields }));
            }
            output::section("Parsed wager");
            output::field("Player", &fields.player_name);
            output::field("Venue", &fields.venue);
            output::field("Code", &fields.competition_code);
            output::field("Amount", fields.amount);
            Ok(())
        }
        Err(failure) => report_failure(&failure),
    }
}

/// Execute `record`.
pub async fn execute_record(
    services: &Services<SqliteLedgerStore>,
    args: &RecordArgs,
) -> Result<()> {
    let message = ChatMessage {
        message_id: MessageId::new(
            args.message_id
                .clone()
                .unwrap_or_else(|| format!("cli-{}", Utc::now().timestamp_millis())),
        ),
        sender_name: args.sender.clone(),
        sender_id: args.player_id.clone().map(PlayerId::new),
        group_id: args.group_id.clone().map(GroupId::new),
        text: Some(args.text.clone()),
    };

    match services.intake.handle(&message).await? {
        IntakeOutcome::Recorded(record) => {
            if output::is_json() {
                return output::json_output("record", &json!({ "recorded": record }));
            }
            output::success(&format!("Recorded at row {}", record.position));
            print_record(&record);
        }
        IntakeOutcome::Rejected(failure) => report_failure(&failure)?,
        IntakeOutcome::Ignored => output::warning("Nothing to record"),
    }
    Ok(())
}

/// Execute `cancel`.
pub async fn execute_cancel(
    services: &Services<SqliteLedgerStore>,
    day: DayKey,
    args: &CancelArgs,
) -> Result<()> {
    let outcome = services
        .cancellation
        .resolve_cancellation(day, &args.text)
        .await?;

    if output::is_json() {
        return output::json_output("cancel", &outcome);
    }
    match outcome {
        CancellationOutcome::Cancelled(record) => {
            output::success(&format!("Cancelled row {}", record.position));
            print_record(&record);
        }
        CancellationOutcome::NotFound => output::warning("No pending wager matches that text"),
    }
    Ok(())
}

fn report_failure(failure: &ParseFailure) -> Result<()> {
    if output::is_json() {
        return output::json_output("parse", &json!({ "ok": false, "failure": failure }));
    }
    output::warning(&failure.to_string());
    Ok(())
}

fn print_record(record: &WagerRecord) {
    output::field("Player", &record.player_name);
    output::field("Venue", &record.venue);
    output::field("Code", &record.competition_code);
    output::field("Amount", record.amount);
    output::field("Status", record.status.as_str());
    output::field("Day", record.day);
}
