//! SQLite file behind the collection store.
//!
//! # Responsibility
//! - Create the data directory and open the database file.
//! - Bring the `slots` table to the latest schema before handing it out.
//!
//! # Invariants
//! - `PRAGMA user_version` equals `migrations::latest_version()` on every
//!   returned connection.
//! - A database written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The parent directory of the database file could not be created.
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::CreateDir { dir, source } => write!(
                f,
                "cannot create data directory `{}`: {source}",
                dir.display()
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "slot database is at schema {db_version}; this build reads up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::CreateDir { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
