//! In-memory ledger store for tests and dry runs.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use crate::adapter::outbound::row;
use crate::domain::day::TableName;
use crate::domain::id::RowPosition;
use crate::domain::wager::{LedgerEntry, WagerRecord};
use crate::error::{Error, Result};
use crate::port::outbound::ledger::{LedgerColumn, LedgerStore, TableCreation};

/// Store primitive, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    CreateTable,
    Append,
    ReadAll,
    UpdateCell,
    Clear,
}

/// [`LedgerStore`] keeping positional text rows in a map.
///
/// Rows go through the same codec as the SQLite adapter, so raw rows
/// planted with [`MemoryLedgerStore::insert_raw`] decode the same way.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    tables: RwLock<HashMap<TableName, Vec<Vec<String>>>>,
    failures: RwLock<HashSet<(StoreOperation, TableName)>>,
    unavailable: RwLock<bool>,
}

impl MemoryLedgerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `operation` on `table` fail with [`Error::Store`] until healed.
    pub fn fail_on(&self, operation: StoreOperation, table: &TableName) {
        self.failures.write().insert((operation, table.clone()));
    }

    /// Make every call fail with [`Error::StoreUnavailable`] until healed.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write() = unavailable;
    }

    /// Drop every injected failure.
    pub fn heal(&self) {
        self.failures.write().clear();
        *self.unavailable.write() = false;
    }

    /// Append raw cells as-is, creating the table if needed.
    pub fn insert_raw(&self, table: &TableName, cells: &[&str]) -> RowPosition {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.clone()).or_default();
        rows.push(cells.iter().map(|c| (*c).to_string()).collect());
        position_of(rows.len() - 1)
    }

    /// Whether the table has been created.
    #[must_use]
    pub fn has_table(&self, table: &TableName) -> bool {
        self.tables.read().contains_key(table)
    }

    /// Number of rows currently in a table.
    #[must_use]
    pub fn row_count(&self, table: &TableName) -> usize {
        self.tables.read().get(table).map_or(0, Vec::len)
    }

    fn check(&self, operation: StoreOperation, table: &TableName) -> Result<()> {
        if *self.unavailable.read() {
            return Err(Error::StoreUnavailable("memory store offline".into()));
        }
        if self.failures.read().contains(&(operation, table.clone())) {
            return Err(Error::Store(format!("injected {operation:?} failure on {table}")));
        }
        Ok(())
    }
}

fn position_of(index: usize) -> RowPosition {
    RowPosition::new(u32::try_from(index + 1).unwrap_or(u32::MAX))
}

impl LedgerStore for MemoryLedgerStore {
    async fn create_table(&self, table: &TableName) -> Result<TableCreation> {
        self.check(StoreOperation::CreateTable, table)?;
        let mut tables = self.tables.write();
        if tables.contains_key(table) {
            return Ok(TableCreation::AlreadyExists);
        }
        tables.insert(table.clone(), Vec::new());
        Ok(TableCreation::Created)
    }

    async fn append(&self, table: &TableName, entry: &LedgerEntry) -> Result<RowPosition> {
        self.check(StoreOperation::Append, table)?;
        let mut tables = self.tables.write();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| Error::Store(format!("table {table} does not exist")))?;
        rows.push(row::encode(entry));
        Ok(position_of(rows.len() - 1))
    }

    async fn read_all(&self, table: &TableName) -> Result<Vec<WagerRecord>> {
        self.check(StoreOperation::ReadAll, table)?;
        let tables = self.tables.read();
        Ok(tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .enumerate()
                    .map(|(i, cells)| row::decode(table, position_of(i), cells))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_cell(
        &self,
        table: &TableName,
        position: RowPosition,
        column: LedgerColumn,
        value: &str,
    ) -> Result<()> {
        self.check(StoreOperation::UpdateCell, table)?;
        let mut tables = self.tables.write();
        let cells = tables
            .get_mut(table)
            .and_then(|rows| {
                let index = usize::try_from(position.get()).ok()?.checked_sub(1)?;
                rows.get_mut(index)
            })
            .ok_or_else(|| Error::Store(format!("no row {position} in table {table}")))?;

        if cells.len() <= column.index() {
            cells.resize(column.index() + 1, String::new());
        }
        cells[column.index()] = value.to_string();
        Ok(())
    }

    async fn clear(&self, table: &TableName) -> Result<usize> {
        self.check(StoreOperation::Clear, table)?;
        Ok(self
            .tables
            .write()
            .get_mut(table)
            .map(|rows| rows.drain(..).count())
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wager::{NewWager, WagerStatus};
    use chrono::Utc;

    fn entry(player: &str) -> LedgerEntry {
        NewWager::try_new(player, "ห้องหนึ่ง", "ดำ", 100)
            .unwrap()
            .into_entry(Utc::now())
    }

    #[tokio::test]
    async fn rows_come_back_in_position_order() {
        let store = MemoryLedgerStore::new();
        let table = TableName::new("2026-03-02");
        store.create_table(&table).await.unwrap();
        store.append(&table, &entry("Lek")).await.unwrap();
        store.append(&table, &entry("Nok")).await.unwrap();

        let rows = store.read_all(&table).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, ["Lek", "Nok"]);
        assert_eq!(rows[1].position, RowPosition::new(2));
    }

    #[tokio::test]
    async fn short_raw_rows_can_still_be_updated() {
        let store = MemoryLedgerStore::new();
        let table = TableName::new("2026-03-02");
        let position = store.insert_raw(&table, &["", "Lek", "", "50", "ดำ", "ห้อง"]);

        store
            .update_cell(&table, position, LedgerColumn::Status, "cancelled")
            .await
            .unwrap();

        let rows = store.read_all(&table).await.unwrap();
        assert_eq!(rows[0].status, WagerStatus::Cancelled);
    }

    #[tokio::test]
    async fn injected_failures_only_hit_their_table() {
        let store = MemoryLedgerStore::new();
        let live = TableName::new("2026-03-02");
        let archive = TableName::new("archive_2026-03-02");
        store.create_table(&live).await.unwrap();
        store.create_table(&archive).await.unwrap();
        store.fail_on(StoreOperation::Append, &archive);

        assert!(store.append(&live, &entry("Lek")).await.is_ok());
        assert!(matches!(
            store.append(&archive, &entry("Lek")).await,
            Err(Error::Store(_))
        ));

        store.heal();
        assert!(store.append(&archive, &entry("Lek")).await.is_ok());
    }

    #[tokio::test]
    async fn unavailable_store_rejects_everything() {
        let store = MemoryLedgerStore::new();
        store.set_unavailable(true);
        let result = store.read_all(&TableName::new("2026-03-02")).await;
        assert!(matches!(result, Err(Error::StoreUnavailable(_))));
    }
}
