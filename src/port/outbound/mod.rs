//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! The only infrastructure dependency is the tabular ledger store.

pub mod ledger;
