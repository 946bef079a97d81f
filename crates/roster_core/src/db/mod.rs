//! Catalog database access.
//!
//! # Responsibility
//! - Open the catalog file (or an in-memory catalog) ready for repositories.
//! - Classify open failures so callers and logs can tell a missing path from
//!   a damaged file or a file written by a newer build.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A connection is only handed out after migrations succeed.

use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Catalog storage failure.
#[derive(Debug)]
pub enum DbError {
    /// The catalog location could not be opened or created.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// The file exists but is not a SQLite database.
    NotACatalog,
    /// Catalog schema is ahead of this build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Stable code for `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open { .. } => "db_open_failed",
            Self::NotACatalog => "db_not_a_catalog",
            Self::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
            Self::Sqlite(_) => "db_sqlite_error",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => write!(f, "cannot open `{target}`: {source}"),
            Self::NotACatalog => write!(f, "file is not a roster catalog database"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "catalog was written by a newer build (schema {db_version}, this build reads up to {latest_supported})"
            ),
            Self::Sqlite(err) => write!(f, "catalog storage error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::NotACatalog | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        if value.sqlite_error_code() == Some(ErrorCode::NotADatabase) {
            return Self::NotACatalog;
        }
        Self::Sqlite(value)
    }
}
