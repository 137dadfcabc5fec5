//! Connection management, schema, and row types for the ledger database.

pub mod connection;
pub mod model;
pub mod schema;
