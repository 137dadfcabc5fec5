//! Persistence port for day-named ledger tables.
//!
//! The backing store is an append-only tabular service with no transactions
//! or locks. It offers five primitives: create a table, append a row, read
//! every row, overwrite one cell, and clear a table. Rows are positional;
//! adapters decode them into [`WagerRecord`]s before handing them out, so
//! nothing above this port sees raw cells.

use std::fmt;
use std::future::Future;

use crate::domain::day::TableName;
use crate::domain::id::RowPosition;
use crate::domain::wager::{LedgerEntry, WagerRecord};
use crate::error::Result;

/// Columns of a ledger row, in storage order.
///
/// The first eight are the historical layout; `GroupId` and `Payout` were
/// appended after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerColumn {
    RecordedAt,
    PlayerName,
    PlayerId,
    Amount,
    CompetitionCode,
    Venue,
    Status,
    ArchivalFlag,
    GroupId,
    Payout,
}

impl LedgerColumn {
    /// All columns in storage order.
    pub const ALL: [Self; 10] = [
        Self::RecordedAt,
        Self::PlayerName,
        Self::PlayerId,
        Self::Amount,
        Self::CompetitionCode,
        Self::Venue,
        Self::Status,
        Self::ArchivalFlag,
        Self::GroupId,
        Self::Payout,
    ];

    /// Zero-based index of the column within a row.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::RecordedAt => 0,
            Self::PlayerName => 1,
            Self::PlayerId => 2,
            Self::Amount => 3,
            Self::CompetitionCode => 4,
            Self::Venue => 5,
            Self::Status => 6,
            Self::ArchivalFlag => 7,
            Self::GroupId => 8,
            Self::Payout => 9,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RecordedAt => "recorded_at",
            Self::PlayerName => "player_name",
            Self::PlayerId => "player_id",
            Self::Amount => "amount",
            Self::CompetitionCode => "competition_code",
            Self::Venue => "venue",
            Self::Status => "status",
            Self::ArchivalFlag => "archival_flag",
            Self::GroupId => "group_id",
            Self::Payout => "payout",
        }
    }
}

impl fmt::Display for LedgerColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of asking the store to create a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCreation {
    Created,
    /// The table was already there. Callers treat this as success.
    AlreadyExists,
}

/// Storage operations over day-named ledger tables.
///
/// Reading a table that was never created yields no rows. Failing to reach
/// the store surfaces as [`Error::StoreUnavailable`](crate::error::Error);
/// a call the store rejects surfaces as [`Error::Store`](crate::error::Error).
/// Neither is retried here.
pub trait LedgerStore: Send + Sync {
    /// Create a table if it does not exist yet.
    fn create_table(&self, table: &TableName)
        -> impl Future<Output = Result<TableCreation>> + Send;

    /// Append a row, returning the position it landed at.
    fn append(
        &self,
        table: &TableName,
        entry: &LedgerEntry,
    ) -> impl Future<Output = Result<RowPosition>> + Send;

    /// Read every row of a table in position order.
    fn read_all(&self, table: &TableName) -> impl Future<Output = Result<Vec<WagerRecord>>> + Send;

    /// Overwrite a single cell.
    fn update_cell(
        &self,
        table: &TableName,
        position: RowPosition,
        column: LedgerColumn,
        value: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Remove every row of a table. Returns the number of rows removed.
    fn clear(&self, table: &TableName) -> impl Future<Output = Result<usize>> + Send;
}
