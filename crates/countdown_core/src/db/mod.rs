//! SQLite bootstrap for the countdown event store.
//!
//! # Responsibility
//! - Open and configure SQLite connections (file or in-memory).
//! - Ensure the `events` table exists before any read/write.
//! - Resolve the default user-private database location.
//!
//! # Invariants
//! - The one schema version is stamped in `PRAGMA user_version`; there is no
//!   upgrade path beyond creating the table.
//! - No event row is read or written before the schema is ensured.

use std::path::PathBuf;
use thiserror::Error;

mod open;

pub use open::{open_db, open_db_in_memory, SCHEMA_VERSION};

/// Directory created under the user's documents folder.
pub const APP_DIR_NAME: &str = "My Countdown";
/// Database file name inside [`APP_DIR_NAME`].
pub const DB_FILE_NAME: &str = "events.sqlite3";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// The directory holding the database file could not be created.
    #[error("failed to create database directory `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

/// Returns the default database file location for the current user.
///
/// Prefers the documents directory and falls back to the local data
/// directory. Returns `None` on platforms exposing neither.
pub fn default_db_path() -> Option<PathBuf> {
    dirs::document_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| base.join(APP_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, DB_FILE_NAME};

    #[test]
    fn default_path_ends_with_db_file_name() {
        if let Some(path) = default_db_path() {
            assert!(path.ends_with(DB_FILE_NAME));
            assert!(path.is_absolute());
        }
    }
}
