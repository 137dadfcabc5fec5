//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - the command line that drives the application
//! - [`outbound`] - ledger stores: SQLite and in-memory

pub mod inbound;
pub mod outbound;
