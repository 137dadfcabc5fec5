use std::fmt;

use thiserror::Error;

use crate::domain::day::DayKey;
use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Phase of an archive rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivePhase {
    /// Copying the live rows into the archive table.
    Snapshot,
    /// Clearing the live table after a successful snapshot.
    Clear,
}

impl fmt::Display for ArchivePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot => f.write_str("snapshot"),
            Self::Clear => f.write_str("clear"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The ledger store could not be reached.
    #[error("ledger store unavailable: {0}")]
    StoreUnavailable(String),

    /// The ledger store rejected a call.
    #[error("ledger store error: {0}")]
    Store(String),

    /// An archive rotation stopped part-way. A failed snapshot never clears
    /// the live table, so rerunning for the same day is always safe.
    #[error("archive of {day} failed during {phase}: {source}")]
    Archive {
        day: DayKey,
        phase: ArchivePhase,
        #[source]
        source: Box<Error>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a failure from one archive phase.
    #[must_use]
    pub fn archive(day: DayKey, phase: ArchivePhase, source: Error) -> Self {
        Self::Archive {
            day,
            phase,
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
