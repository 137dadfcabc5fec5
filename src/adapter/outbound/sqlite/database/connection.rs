//! Connection pooling and migrations for the ledger database.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Migrations compiled in from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Create a connection pool for the given database URL or path.
///
/// # Errors
/// Returns [`Error::StoreUnavailable`] if the database cannot be opened.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(5)
        .build(manager)
        .map_err(|e| Error::StoreUnavailable(e.to_string()))
}

/// Apply pending migrations.
///
/// # Errors
/// Returns an error if a connection cannot be taken or a migration fails.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
    configure_sqlite_connection(&mut conn)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Store(e.to_string()))?;
    Ok(())
}

/// Apply the pragmas every ledger connection needs.
///
/// # Errors
/// Returns [`Error::Store`] if a pragma is rejected.
pub fn configure_sqlite_connection(conn: &mut SqliteConnection) -> Result<()> {
    diesel::sql_query("PRAGMA busy_timeout=5000")
        .execute(conn)
        .map_err(|e| Error::Store(e.to_string()))?;
    Ok(())
}
