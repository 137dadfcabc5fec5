//! Diesel row types.

use diesel::prelude::*;

use super::schema::{ledger_rows, ledger_tables};
use crate::adapter::outbound::row::ROW_WIDTH;

/// Registry entry for a named ledger table.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = ledger_tables)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerTableRow {
    pub name: String,
    pub created_at: String,
}

/// One positional ledger row, every cell stored as text.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = ledger_rows)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerRow {
    pub table_name: String,
    pub position: i32,
    pub recorded_at: String,
    pub player_name: String,
    pub player_id: String,
    pub amount: String,
    pub competition_code: String,
    pub venue: String,
    pub status: String,
    pub archival_flag: String,
    pub group_id: String,
    pub payout: String,
}

impl LedgerRow {
    /// Build a row from positional cells. Missing trailing cells are blank.
    #[must_use]
    pub fn from_cells(table_name: &str, position: i32, cells: &[String]) -> Self {
        let mut cells = cells.iter().cloned();
        let mut next = || cells.next().unwrap_or_default();
        Self {
            table_name: table_name.to_string(),
            position,
            recorded_at: next(),
            player_name: next(),
            player_id: next(),
            amount: next(),
            competition_code: next(),
            venue: next(),
            status: next(),
            archival_flag: next(),
            group_id: next(),
            payout: next(),
        }
    }

    /// Cells in storage order.
    #[must_use]
    pub fn into_cells(self) -> Vec<String> {
        let cells = vec![
            self.recorded_at,
            self.player_name,
            self.player_id,
            self.amount,
            self.competition_code,
            self.venue,
            self.status,
            self.archival_flag,
            self.group_id,
            self.payout,
        ];
        debug_assert_eq!(cells.len(), ROW_WIDTH);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cell_lists_are_padded_with_blanks() {
        let cells: Vec<String> = ["t", "Lek", "", "100"].iter().map(|s| s.to_string()).collect();
        let row = LedgerRow::from_cells("2026-03-02", 3, &cells);

        assert_eq!(row.amount, "100");
        assert_eq!(row.payout, "");

        let back = row.into_cells();
        assert_eq!(back.len(), ROW_WIDTH);
        assert_eq!(&back[..4], &cells[..]);
    }
}
