//! Bounded in-memory caches used next to the request path.
//!
//! - [`bounded::BoundedCache`]: fixed-capacity map with drop-oldest eviction
//! - [`history::MessageHistory`]: recent chat messages, for resolving
//!   deletions that arrive with only a message id

pub mod bounded;
pub mod history;

pub use bounded::BoundedCache;
pub use history::{HistoryEntry, MessageHistory};
