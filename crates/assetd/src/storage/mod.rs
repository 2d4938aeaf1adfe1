//! Storage layer for assetd.
//!
//! `SQLite`-backed persistence for asset records. Request handlers open a
//! fresh connection per insert from a shared [`ConnectionSettings`]; there is
//! no pool and no retry.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, info};

use crate::asset::NewAsset;
use crate::config::Config;
use crate::error::{Error, Result};

/// How request-time connections reach the database.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    /// Path to the database file.
    pub path: PathBuf,
    /// Flags passed to `sqlite3_open_v2`.
    pub flags: OpenFlags,
}

impl ConnectionSettings {
    /// Settings for an existing database file.
    ///
    /// The file is opened read-write but never created, so a missing or
    /// misplaced database surfaces as a connection failure.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            flags: OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        }
    }

    /// Settings for the database named in the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.database_path())
    }
}

/// A single open connection to the asset database.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Connect to an existing database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseOpen`] if the file cannot be opened with the
    /// configured flags.
    pub fn connect(settings: &ConnectionSettings) -> Result<Self> {
        debug!("Connecting to database at {}", settings.path.display());
        let conn = Connection::open_with_flags(&settings.path, settings.flags).map_err(
            |source| Error::DatabaseOpen {
                path: settings.path.clone(),
                source,
            },
        )?;

        Ok(Self {
            path: settings.path.clone(),
            conn,
        })
    }

    /// Create the database file if needed and provision the schema.
    ///
    /// Creates parent directories, enables WAL, then creates any missing
    /// tables and records the schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if directories, the database, or the schema cannot
    /// be created.
    pub fn provision(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL lets concurrent request connections read while one writes.
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database provisioned at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create a provisioned in-memory database.
    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert one asset and return its row id.
    ///
    /// Values are bound as parameters; absent fields are stored as `NULL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails (missing table, locked
    /// database, constraint added by other tooling, ...).
    pub fn insert_asset(&self, asset: &NewAsset) -> Result<i64> {
        self.conn.execute(
            schema::INSERT_ASSET,
            params![
                asset.name,
                asset.vendor,
                asset.warranty_expiry,
                asset.status,
                asset.barcode,
                asset.history,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted asset with id {}", id);
        Ok(id)
    }

    /// Count stored assets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Assets", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Recorded schema version, 0 when unversioned.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32> {
        migrations::get_schema_version(&self.conn)
    }
}

/// Connect and insert on the blocking pool.
///
/// One connection per call. A panicked worker is reported as
/// [`Error::Internal`].
///
/// # Errors
///
/// Returns whatever [`Storage::connect`] or [`Storage::insert_asset`] returns.
pub async fn insert_asset(settings: &ConnectionSettings, asset: NewAsset) -> Result<i64> {
    let settings = settings.clone();
    tokio::task::spawn_blocking(move || {
        let storage = Storage::connect(&settings)?;
        storage.insert_asset(&asset)
    })
    .await
    .map_err(|e| Error::internal(format!("insert worker failed: {e}")))?
}
