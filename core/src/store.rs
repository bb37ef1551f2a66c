use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::{Connection, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Serialized recipe history.
pub const HISTORY_KEY: &str = "recipe-history";
/// Boolean dark-mode preference read by the rendering layer.
pub const DARK_MODE_KEY: &str = "dark-mode";
/// The working ingredient list kept between CLI invocations.
pub const INGREDIENTS_KEY: &str = "ingredients";

/// Synchronous text key/value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn migrate(conn: &Connection) -> Result<()> {
        let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Local::now().to_rfc3339();
        self.conn().execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed, fail-closed access to a [`KeyValueStore`].
///
/// Reads never fail: a missing, unreadable or unparsable value yields the
/// caller's default. Writes are best-effort: failures are logged and the
/// caller's in-memory state stays authoritative.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistentStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(SqliteStore::open(path)?))
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                warn!(key, "failed to read persisted value: {err:#}");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, "discarding unparsable persisted value: {err}");
                default
            }
        }
    }

    /// Serialize and write `value`. Returns whether the write landed.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, "failed to serialize value for persistence: {err}");
                return false;
            }
        };

        match self.backend.set(key, &raw) {
            Ok(()) => {
                debug!(key, bytes = raw.len(), "persisted value");
                true
            }
            Err(err) => {
                warn!(key, "failed to persist value: {err:#}");
                false
            }
        }
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.load(DARK_MODE_KEY, false)
    }

    pub fn set_dark_mode(&self, enabled: bool) -> bool {
        self.save(DARK_MODE_KEY, &enabled)
    }
}
