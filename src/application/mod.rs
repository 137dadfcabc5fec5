//! Application services (use cases).
//!
//! Services are generic over the [`LedgerStore`](crate::port::LedgerStore)
//! they run against and share it through [`ledger::DailyLedgerService`].

pub mod aggregation;
pub mod archive;
pub mod cache;
pub mod cancellation;
pub mod intake;
pub mod ledger;
pub mod parser;
pub mod settlement;
