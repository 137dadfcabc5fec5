//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!   Scheduler ──► DailyTick ──┐
//!                             ▼
//!                     ┌───────────────┐
//!   CLI / chat ──────►│  Application  │
//!                     └───────┬───────┘
//!                             ▼
//!                        LedgerStore
//!                      ┌──────┴──────┐
//!                   SQLite        Memory
//! ```

pub mod inbound;
pub mod outbound;

pub use inbound::schedule::DailyTick;
pub use outbound::ledger::{LedgerColumn, LedgerStore, TableCreation};
