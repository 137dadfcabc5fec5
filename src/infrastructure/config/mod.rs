//! Configuration sections and loading.

pub mod intake;
pub mod ledger;
pub mod logging;
pub mod settings;
pub mod settlement;

pub use settings::Config;
