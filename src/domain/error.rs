//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! Every variant names the offending field or value so callers can report
//! exactly what was wrong.
//!
//! # Examples
//!
//! ```
//! use wagerbook::domain::error::DomainError;
//! use wagerbook::domain::wager::NewWager;
//!
//! let result = NewWager::try_new("somchai", "สนามชล", "แดง", 0);
//! assert!(matches!(result, Err(DomainError::NonPositiveAmount { amount: 0 })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::id::RowPosition;
use super::wager::WagerStatus;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Stakes must be positive whole amounts.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The invalid amount that was provided.
        amount: i64,
    },

    /// Stakes above the ledger cap are refused so totals stay exact.
    #[error("amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge {
        /// The amount that was provided.
        amount: i64,
        /// The largest accepted amount.
        max: i64,
    },

    /// A required text field was empty after trimming.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// Odds multipliers must be positive.
    #[error("odds must be positive, got {odds}")]
    NonPositiveOdds {
        /// The invalid odds that were provided.
        odds: Decimal,
    },

    /// Settled and cancelled wagers never change again.
    #[error("wager at row {position} is already {status}")]
    TerminalStatus {
        /// Row of the wager that was about to be mutated.
        position: RowPosition,
        /// Its current terminal status.
        status: WagerStatus,
    },

    /// Day keys are `YYYY-MM-DD` calendar dates.
    #[error("invalid day key '{value}', expected YYYY-MM-DD")]
    InvalidDayKey {
        /// The text that failed to parse.
        value: String,
    },
}
