//! SQLite ledger store.

use chrono::Utc;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::debug;

use crate::adapter::outbound::row;
use crate::adapter::outbound::sqlite::database::connection::{configure_sqlite_connection, DbPool};
use crate::adapter::outbound::sqlite::database::model::{LedgerRow, LedgerTableRow};
use crate::adapter::outbound::sqlite::database::schema::{ledger_rows, ledger_tables};
use crate::domain::day::TableName;
use crate::domain::id::RowPosition;
use crate::domain::wager::{LedgerEntry, WagerRecord};
use crate::error::{Error, Result};
use crate::port::outbound::ledger::{LedgerColumn, LedgerStore, TableCreation};

type Conn = PooledConnection<ConnectionManager<diesel::SqliteConnection>>;

/// [`LedgerStore`] backed by two SQLite tables: a registry of ledger table
/// names and the positional rows of every ledger table.
pub struct SqliteLedgerStore {
    pool: DbPool,
}

impl SqliteLedgerStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        configure_sqlite_connection(&mut conn)?;
        Ok(conn)
    }
}

fn to_db_position(position: RowPosition) -> Result<i32> {
    i32::try_from(position.get())
        .map_err(|_| Error::Store(format!("row position {position} out of range")))
}

fn from_db_position(position: i32) -> RowPosition {
    RowPosition::new(u32::try_from(position).unwrap_or_default())
}

impl LedgerStore for SqliteLedgerStore {
    async fn create_table(&self, table: &TableName) -> Result<TableCreation> {
        let mut conn = self.conn()?;
        let entry = LedgerTableRow {
            name: table.as_str().to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        let inserted = diesel::insert_or_ignore_into(ledger_tables::table)
            .values(&entry)
            .execute(&mut conn)
            .map_err(|e| Error::Store(e.to_string()))?;

        Ok(if inserted == 0 {
            TableCreation::AlreadyExists
        } else {
            debug!(table = %table, "Ledger table created");
            TableCreation::Created
        })
    }

    async fn append(&self, table: &TableName, entry: &LedgerEntry) -> Result<RowPosition> {
        let mut conn = self.conn()?;
        let name = table.as_str();
        let cells = row::encode(entry);

        // Immediate, so two writers cannot both read the same last position.
        let position = conn
            .immediate_transaction::<_, diesel::result::Error, _>(|conn| {
                let registered: i64 = ledger_tables::table
                    .filter(ledger_tables::name.eq(name))
                    .count()
                    .get_result(conn)?;
                if registered == 0 {
                    return Ok(None);
                }

                let last: Option<i32> = ledger_rows::table
                    .filter(ledger_rows::table_name.eq(name))
                    .select(max(ledger_rows::position))
                    .first(conn)?;
                let position = last.unwrap_or(0) + 1;

                diesel::insert_into(ledger_rows::table)
                    .values(&LedgerRow::from_cells(name, position, &cells))
                    .execute(conn)?;
                Ok(Some(position))
            })
            .map_err(|e| Error::Store(e.to_string()))?;

        position
            .map(from_db_position)
            .ok_or_else(|| Error::Store(format!("table {table} does not exist")))
    }

    async fn read_all(&self, table: &TableName) -> Result<Vec<WagerRecord>> {
        let mut conn = self.conn()?;

        let rows: Vec<LedgerRow> = ledger_rows::table
            .filter(ledger_rows::table_name.eq(table.as_str()))
            .order(ledger_rows::position.asc())
            .select(LedgerRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Store(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let position = from_db_position(r.position);
                row::decode(table, position, &r.into_cells())
            })
            .collect())
    }

    async fn update_cell(
        &self,
        table: &TableName,
        position: RowPosition,
        column: LedgerColumn,
        value: &str,
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let db_position = to_db_position(position)?;

        macro_rules! set_cell {
            ($column:ident) => {
                diesel::update(
                    ledger_rows::table
                        .filter(ledger_rows::table_name.eq(table.as_str()))
                        .filter(ledger_rows::position.eq(db_position)),
                )
                .set(ledger_rows::$column.eq(value))
                .execute(&mut conn)
            };
        }

        let updated = match column {
            LedgerColumn::RecordedAt => set_cell!(recorded_at),
            LedgerColumn::PlayerName => set_cell!(player_name),
            LedgerColumn::PlayerId => set_cell!(player_id),
            LedgerColumn::Amount => set_cell!(amount),
            LedgerColumn::CompetitionCode => set_cell!(competition_code),
            LedgerColumn::Venue => set_cell!(venue),
            LedgerColumn::Status => set_cell!(status),
            LedgerColumn::ArchivalFlag => set_cell!(archival_flag),
            LedgerColumn::GroupId => set_cell!(group_id),
            LedgerColumn::Payout => set_cell!(payout),
        }
        .map_err(|e| Error::Store(e.to_string()))?;

        if updated == 0 {
            return Err(Error::Store(format!("no row {position} in table {table}")));
        }
        Ok(())
    }

    async fn clear(&self, table: &TableName) -> Result<usize> {
        let mut conn = self.conn()?;
        diesel::delete(ledger_rows::table.filter(ledger_rows::table_name.eq(table.as_str())))
            .execute(&mut conn)
            .map_err(|e| Error::Store(e.to_string()))
    }
}
