//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! - [`ledger`] - ledger services over the in-memory store
//! - [`wager`] - builders for wagers and day keys

pub mod ledger;
pub mod wager;
