//! Ledger storage and archive rotation settings.

use chrono::{FixedOffset, NaiveTime};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// `[ledger]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// SQLite database path. `WAGERBOOK_DATABASE` overrides it.
    pub database: String,

    /// UTC offset that decides which calendar day a wager belongs to,
    /// written as `+07:00`. Defaults to Bangkok time.
    pub utc_offset: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            database: "wagerbook.db".into(),
            utc_offset: "+07:00".into(),
        }
    }
}

impl LedgerConfig {
    /// Parsed day-key offset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a malformed offset.
    pub fn offset(&self) -> Result<FixedOffset> {
        self.utc_offset
            .trim()
            .parse()
            .map_err(|e: chrono::ParseError| {
                ConfigError::InvalidValue {
                    field: "ledger.utc_offset",
                    reason: format!("expected a form like +07:00 ({e})"),
                }
                .into()
            })
    }
}

/// `[archive]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Whether `run` schedules the daily rotation.
    pub enabled: bool,

    /// Local wall-clock time of the daily rotation, `HH:MM`. The rotation
    /// archives the day it fires on.
    pub time: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            time: "23:59".into(),
        }
    }
}

impl ArchiveConfig {
    /// Parsed rotation time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless the time is `HH:MM`.
    pub fn fire_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(self.time.trim(), "%H:%M").map_err(|e| {
            ConfigError::InvalidValue {
                field: "archive.time",
                reason: format!("expected HH:MM ({e})"),
            }
            .into()
        })
    }
}
