//! Positional row codec shared by the ledger store adapters.
//!
//! The store keeps every cell as text, and rows written by other tools may
//! be short, padded, or use status synonyms. Decoding happens here and only
//! here, with an explicit default for each malformed cell.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::day::{DayKey, TableName};
use crate::domain::id::{GroupId, PlayerId, RowPosition};
use crate::domain::wager::{LedgerEntry, WagerRecord, WagerStatus};
use crate::port::outbound::ledger::LedgerColumn;

/// Archival flag cell value for rows inside an archive snapshot.
pub const ARCHIVED_FLAG: &str = "archived";

/// Number of cells in a ledger row.
pub const ROW_WIDTH: usize = LedgerColumn::ALL.len();

/// Encode an entry into its positional cells.
#[must_use]
pub fn encode(entry: &LedgerEntry) -> Vec<String> {
    let mut cells = vec![String::new(); ROW_WIDTH];
    cells[LedgerColumn::RecordedAt.index()] = entry.recorded_at.to_rfc3339();
    cells[LedgerColumn::PlayerName.index()] = entry.player_name.clone();
    cells[LedgerColumn::PlayerId.index()] = entry
        .player_id
        .as_ref()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();
    cells[LedgerColumn::Amount.index()] = entry.amount.to_string();
    cells[LedgerColumn::CompetitionCode.index()] = entry.competition_code.clone();
    cells[LedgerColumn::Venue.index()] = entry.venue.clone();
    cells[LedgerColumn::Status.index()] = entry.status.as_str().to_string();
    cells[LedgerColumn::ArchivalFlag.index()] = if entry.archived {
        ARCHIVED_FLAG.to_string()
    } else {
        String::new()
    };
    cells[LedgerColumn::GroupId.index()] = entry
        .group_id
        .as_ref()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();
    cells[LedgerColumn::Payout.index()] = entry.payout.map(|p| p.to_string()).unwrap_or_default();
    cells
}

/// Decode positional cells read from `table` into a typed record.
///
/// Defaults: unparsable timestamps become the Unix epoch, unparsable
/// amounts become 0, blank ids and payouts become `None`, and the status
/// goes through [`WagerStatus::normalize`].
#[must_use]
pub fn decode(table: &TableName, position: RowPosition, cells: &[String]) -> WagerRecord {
    let cell = |column: LedgerColumn| cells.get(column.index()).map_or("", |c| c.trim());

    let recorded_at = DateTime::parse_from_rfc3339(cell(LedgerColumn::RecordedAt))
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default();
    let day = table
        .day()
        .unwrap_or_else(|| DayKey::new(recorded_at.date_naive()));

    let entry = LedgerEntry {
        recorded_at,
        player_name: cell(LedgerColumn::PlayerName).to_string(),
        player_id: non_blank(cell(LedgerColumn::PlayerId)).map(PlayerId::new),
        venue: cell(LedgerColumn::Venue).to_string(),
        competition_code: cell(LedgerColumn::CompetitionCode).to_string(),
        amount: parse_amount(cell(LedgerColumn::Amount)),
        status: WagerStatus::normalize(cell(LedgerColumn::Status)),
        group_id: non_blank(cell(LedgerColumn::GroupId)).map(GroupId::new),
        payout: non_blank(cell(LedgerColumn::Payout)).and_then(|p| Decimal::from_str(p).ok()),
        archived: is_archived(cell(LedgerColumn::ArchivalFlag)),
    };
    WagerRecord::from_entry(position, day, entry)
}

fn non_blank(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Amount cells may carry thousands separators.
fn parse_amount(value: &str) -> i64 {
    value.replace(',', "").parse().unwrap_or(0)
}

fn is_archived(value: &str) -> bool {
    value.eq_ignore_ascii_case(ARCHIVED_FLAG) || value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wager::NewWager;
    use rust_decimal_macros::dec;

    fn table() -> TableName {
        TableName::new("2026-03-02")
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn encoded_rows_decode_to_the_same_entry() {
        let mut entry = NewWager::try_new("Nok", "สนามชล", "แดง", 500)
            .unwrap()
            .with_player_id(PlayerId::new("U1"))
            .with_group_id(GroupId::new("C1"))
            .into_entry(Utc::now());
        entry.payout = Some(dec!(1500.50));
        entry.status = WagerStatus::Win;

        let record = decode(&table(), RowPosition::new(4), &encode(&entry));

        assert_eq!(record.position, RowPosition::new(4));
        assert_eq!(record.day.to_string(), "2026-03-02");
        assert_eq!(record.player_name, "Nok");
        assert_eq!(record.player_id, Some(PlayerId::new("U1")));
        assert_eq!(record.amount, 500);
        assert_eq!(record.status, WagerStatus::Win);
        assert_eq!(record.payout, Some(dec!(1500.50)));
        assert!(!record.archived);
    }

    #[test]
    fn short_legacy_rows_get_defaults() {
        let record = decode(
            &table(),
            RowPosition::new(1),
            &cells(&["not a time", "Lek", "", " 1,200 ", "ดำ", "ห้องสอง", "ชนะ"]),
        );

        assert_eq!(record.recorded_at, DateTime::<Utc>::default());
        assert_eq!(record.player_id, None);
        assert_eq!(record.amount, 1200);
        assert_eq!(record.status, WagerStatus::Win);
        assert_eq!(record.group_id, None);
        assert_eq!(record.payout, None);
        assert!(!record.archived);
    }

    #[test]
    fn garbage_amount_defaults_to_zero() {
        let record = decode(
            &table(),
            RowPosition::new(1),
            &cells(&["", "Lek", "", "lots", "ดำ", "ห้อง", ""]),
        );
        assert_eq!(record.amount, 0);
        assert_eq!(record.status, WagerStatus::Pending);
    }

    #[test]
    fn archival_flag_is_read_from_its_column() {
        let mut row = cells(&["", "Lek", "", "10", "ดำ", "ห้อง", "loss", "archived"]);
        let archived = decode(&table(), RowPosition::new(1), &row);
        assert!(archived.archived);
        assert_eq!(archived.status, WagerStatus::Loss);

        row[7] = String::new();
        assert!(!decode(&table(), RowPosition::new(1), &row).archived);
    }
}
