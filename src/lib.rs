//! Wagerbook - a chat wager ledger.
//!
//! Players post free-form wager messages ("name venue code amount") in a
//! group chat. Wagerbook parses them tolerantly, records each wager in a
//! per-day ledger table, settles rounds under a payout policy, cancels
//! wagers whose messages were retracted, and rotates each day's ledger
//! into an archive table.
//!
//! # Modules
//!
//! - [`domain`] - Pure types: day keys, wagers, summaries, payout policies
//! - [`port`] - The ledger store and daily tick traits
//! - [`application`] - Parsing, ledger, aggregation, settlement,
//!   cancellation, archive rotation and chat intake services
//! - [`adapter`] - SQLite and in-memory stores, and the CLI
//! - [`infrastructure`] - Configuration, wiring and the archive scheduler
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use wagerbook::application::parser::WagerTextParser;
//!
//! let fields = WagerTextParser::new().parse("Lek สนามชล แดง 300").unwrap();
//! assert_eq!(fields.player_name, "Lek");
//! assert_eq!(fields.amount, 300);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
