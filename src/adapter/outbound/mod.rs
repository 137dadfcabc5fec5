//! Outbound adapters (driven side).

pub mod memory;
pub mod row;
pub mod sqlite;
