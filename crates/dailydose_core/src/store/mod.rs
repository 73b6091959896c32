//! Named JSON collections in a persistent key-value namespace.
//!
//! # Responsibility
//! - Load and save whole collections, one JSON array per named slot.
//! - Apply the configured policy when a stored payload is malformed.
//!
//! # Invariants
//! - A missing slot, an empty array and JSON `null` all load as empty.
//! - `save` overwrites the whole slot in one statement; there is no partial
//!   update, so every mutation above this layer is read-modify-write.
//! - The connection mutex is held per statement, never across a
//!   read-modify-write. Concurrent writers to one collection are
//!   last-writer-wins.

use crate::db::{open_db, open_db_in_memory, DbError};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Address of one collection: `namespace` groups related slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub namespace: &'static str,
    pub name: &'static str,
}

impl Slot {
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self { namespace, name }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// What `load` does with a payload that is not the expected JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptPolicy {
    /// Log a warning and treat the collection as empty.
    #[default]
    DefaultEmpty,
    /// Return `StoreError::Corrupt`.
    Surface,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    Corrupt {
        slot: Slot,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
            Self::Corrupt { slot, source } => {
                write!(f, "corrupt collection data in `{slot}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Corrupt { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Process-wide collection store over one SQLite connection.
///
/// Construct once at startup and pass by reference (or `Arc`) to
/// repositories and services.
pub struct CollectionStore {
    conn: Mutex<Connection>,
    corrupt_policy: CorruptPolicy,
}

impl CollectionStore {
    /// Wraps a migrated connection.
    pub fn new(conn: Connection, corrupt_policy: CorruptPolicy) -> Self {
        Self {
            conn: Mutex::new(conn),
            corrupt_policy,
        }
    }

    /// Opens a file-backed store, applying migrations.
    pub fn open(path: impl AsRef<Path>, corrupt_policy: CorruptPolicy) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?, corrupt_policy))
    }

    /// Opens an empty in-memory store with the default corruption policy.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?, CorruptPolicy::default()))
    }

    pub fn corrupt_policy(&self) -> CorruptPolicy {
        self.corrupt_policy
    }

    /// Loads the collection stored at `slot`.
    ///
    /// # Errors
    /// - `Db` on storage failure.
    /// - `Corrupt` when the payload is malformed and the policy is `Surface`.
    pub fn load<T: DeserializeOwned>(&self, slot: Slot) -> StoreResult<Vec<T>> {
        let Some(payload) = self.read_payload(slot)? else {
            debug!("event=store_load module=store status=ok slot={slot} count=0 state=absent");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Option<Vec<T>>>(&payload) {
            Ok(records) => {
                let records = records.unwrap_or_default();
                debug!(
                    "event=store_load module=store status=ok slot={} count={}",
                    slot,
                    records.len()
                );
                Ok(records)
            }
            Err(source) => match self.corrupt_policy {
                CorruptPolicy::DefaultEmpty => {
                    warn!(
                        "event=store_load module=store status=degraded slot={} error_code=corrupt_payload bytes={} error={}",
                        slot,
                        payload.len(),
                        source
                    );
                    Ok(Vec::new())
                }
                CorruptPolicy::Surface => {
                    warn!(
                        "event=store_load module=store status=error slot={} error_code=corrupt_payload bytes={}",
                        slot,
                        payload.len()
                    );
                    Err(StoreError::Corrupt { slot, source })
                }
            },
        }
    }

    /// Overwrites the collection at `slot` with `records`.
    pub fn save<T: Serialize>(&self, slot: Slot, records: &[T]) -> StoreResult<()> {
        let payload = serde_json::to_string(records).map_err(StoreError::Serialize)?;
        self.write_payload(slot, &payload)?;
        debug!(
            "event=store_save module=store status=ok slot={} count={} bytes={}",
            slot,
            records.len(),
            payload.len()
        );
        Ok(())
    }

    /// Drops one slot; later loads return an empty collection.
    pub fn remove(&self, slot: Slot) -> StoreResult<bool> {
        let changed = self.lock().execute(
            "DELETE FROM slots WHERE namespace = ?1 AND name = ?2;",
            params![slot.namespace, slot.name],
        )?;
        debug!("event=store_remove module=store status=ok slot={slot} removed={changed}");
        Ok(changed > 0)
    }

    /// Drops every slot in `namespace`, returning the number removed.
    pub fn clear_namespace(&self, namespace: &str) -> StoreResult<usize> {
        let changed = self
            .lock()
            .execute("DELETE FROM slots WHERE namespace = ?1;", [namespace])?;
        debug!(
            "event=store_clear module=store status=ok namespace={namespace} removed={changed}"
        );
        Ok(changed)
    }

    /// Lists stored slot names in `namespace`, sorted by name.
    pub fn slot_names(&self, namespace: &str) -> StoreResult<Vec<String>> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT name FROM slots WHERE namespace = ?1 ORDER BY name ASC;")?;
        let names = stmt
            .query_map([namespace], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Reads the raw payload text, bypassing deserialization.
    pub fn read_payload(&self, slot: Slot) -> StoreResult<Option<String>> {
        let payload = self
            .lock()
            .query_row(
                "SELECT payload FROM slots WHERE namespace = ?1 AND name = ?2;",
                params![slot.namespace, slot.name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    /// Writes raw payload text as-is. Used by import paths and tests that
    /// need to seed data the typed API would refuse.
    pub fn write_payload(&self, slot: Slot, payload: &str) -> StoreResult<()> {
        self.lock().execute(
            "INSERT INTO slots (namespace, name, payload, updated_at)
             VALUES (?1, ?2, ?3, (strftime('%s', 'now') * 1000))
             ON CONFLICT(namespace, name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![slot.namespace, slot.name, payload],
        )?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the guard cannot leave a statement half-run;
        // the connection stays usable.
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
