//! SQLite persistence adapter.
//!
//! Implements [`LedgerStore`](crate::port::outbound::ledger::LedgerStore)
//! on top of Diesel with an r2d2 connection pool.

pub mod database;
pub mod store;

pub use database::connection::{create_pool, run_migrations, DbPool};
pub use store::SqliteLedgerStore;
