//! Pure domain types: day keys, wagers, parse results, summaries, payouts.
//!
//! Nothing in here performs I/O.

pub mod day;
pub mod distribution;
pub mod error;
pub mod id;
pub mod parse;
pub mod settlement;
pub mod summary;
pub mod wager;
