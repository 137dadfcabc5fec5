//! Application configuration loading and validation.
//!
//! Configuration is read from a TOML file. Every section is optional and
//! falls back to its defaults. `WAGERBOOK_DATABASE` overrides the database
//! path so deployments can keep one config file across machines.
//!
//! # Example
//!
//! ```no_run
//! use wagerbook::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::intake::{HistoryConfig, ParserConfig};
use super::ledger::{ArchiveConfig, LedgerConfig};
use super::logging::LoggingConfig;
use super::settlement::SettlementConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `ledger.database`.
pub const DATABASE_ENV: &str = "WAGERBOOK_DATABASE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub settlement: SettlementConfig,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

impl Config {
    /// Parse and validate configuration text, applying environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidValue`] for values that fail validation.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.trim().is_empty() {
                config.ledger.database = database;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] if the file cannot be read, then
    /// anything [`Self::parse_toml`] returns.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when the file exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`] for an existing file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be pretty or json".to_string(),
            }
            .into());
        }
        if self.ledger.database.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "ledger.database",
            }
            .into());
        }
        self.ledger.offset()?;
        self.archive.fire_time()?;
        self.settlement.policy()?;
        if self.history.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.capacity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }
}
