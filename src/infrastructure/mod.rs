//! Infrastructure layer.
//!
//! Technical concerns that support the application without holding
//! business rules.
//!
//! - [`bootstrap`] - composition root
//! - [`config`] - configuration loading and validation
//! - [`scheduler`] - the daily archive trigger

pub mod bootstrap;
pub mod config;
pub mod scheduler;
