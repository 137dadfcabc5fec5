//! Calendar day keys and the table names derived from them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Prefix of archive snapshot tables; the live table has no prefix.
const ARCHIVE_PREFIX: &str = "archive_";

/// Calendar-date key under which a daily ledger and its archive live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wrap a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Day key of `now` as seen from the given UTC offset.
    #[must_use]
    pub fn at(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self(now.with_timezone(&offset).date_naive())
    }

    /// Day key of the current wall-clock time in the given offset.
    #[must_use]
    pub fn today(offset: FixedOffset) -> Self {
        Self::at(Utc::now(), offset)
    }

    /// Underlying calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Name of the live ledger table for this day.
    #[must_use]
    pub fn ledger_table(self) -> TableName {
        TableName(self.to_string())
    }

    /// Name of the archive snapshot table for this day.
    #[must_use]
    pub fn archive_table(self) -> TableName {
        TableName(format!("{ARCHIVE_PREFIX}{self}"))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DomainError::InvalidDayKey {
                value: s.to_string(),
            })
    }
}

/// Name of a table in the tabular store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName(String);

impl TableName {
    /// Create a table name from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the table name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this names an archive snapshot table.
    #[must_use]
    pub fn is_archive(&self) -> bool {
        self.0.starts_with(ARCHIVE_PREFIX)
    }

    /// Day this table belongs to, for live and archive tables alike.
    #[must_use]
    pub fn day(&self) -> Option<DayKey> {
        self.0
            .strip_prefix(ARCHIVE_PREFIX)
            .unwrap_or(&self.0)
            .parse()
            .ok()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
