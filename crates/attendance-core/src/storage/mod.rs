//! Persistence: the key-value store seam, its backends, and configuration.
//!
//! Collections are stored whole, as one JSON array per key. Loading is
//! best-effort: a missing key or a value that fails to parse yields an empty
//! collection. [`try_load_collection`] is the strict variant for callers that
//! want to see the failure.

mod config;
pub mod database;
pub mod memory;

pub use config::{Config, LoggingConfig, StorageConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{LoadError, StorageError};
use crate::ledger::Ledger;
use crate::routine::Routine;

/// Default key holding the routine.
pub const ROUTINE_KEY: &str = "campusone_routine";
/// Default key holding the attendance ledger.
pub const ATTENDANCE_KEY: &str = "campusone_attendance";

/// Returns the data directory.
///
/// `ATTENDANCE_DATA_DIR` wins when set. Otherwise `~/.config/campusone-attendance[-dev]/`,
/// with the `-dev` suffix when `ATTENDANCE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("ATTENDANCE_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ATTENDANCE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("campusone-attendance-dev")
            } else {
                base_dir.join("campusone-attendance")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// String-keyed store of serialized collections.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// A collection persisted under a single key.
pub trait Collection: Serialize + DeserializeOwned + Default {
    fn is_empty(&self) -> bool;
}

impl Collection for Routine {
    fn is_empty(&self) -> bool {
        Routine::is_empty(self)
    }
}

impl Collection for Ledger {
    fn is_empty(&self) -> bool {
        Ledger::is_empty(self)
    }
}

/// Load the collection under `key`, surfacing store and parse failures.
///
/// A missing key is not an error and yields the empty collection.
///
/// # Errors
/// Returns [`LoadError::Corrupt`] if the stored JSON does not parse and
/// [`LoadError::Store`] if the store cannot be read.
pub fn try_load_collection<T: Collection>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T, LoadError> {
    match store.get(key)? {
        None => Ok(T::default()),
        Some(raw) => serde_json::from_str(&raw).map_err(|source| LoadError::Corrupt {
            key: key.to_string(),
            source,
        }),
    }
}

/// Load the collection under `key`, falling back to empty on any failure.
///
/// The failure is logged; the stored value is left untouched.
pub fn load_collection<T: Collection>(store: &dyn KeyValueStore, key: &str) -> T {
    match try_load_collection(store, key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "falling back to empty collection");
            T::default()
        }
    }
}

/// Write `value` under `key` unless it is empty. Returns whether it was written.
///
/// # Errors
/// Returns an error if serialization or the store write fails.
pub fn save_collection<T: Collection>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<bool, StorageError> {
    if value.is_empty() {
        tracing::debug!(key, "skipping write of empty collection");
        return Ok(false);
    }
    let json = serde_json::to_string(value)?;
    store.set(key, &json)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn missing_key_loads_empty() {
        let store = MemoryStore::new();
        let routine: Routine = load_collection(&store, ROUTINE_KEY);
        assert!(routine.is_empty());
    }

    #[test]
    fn corrupt_value_loads_empty_but_strict_load_reports() {
        let mut store = MemoryStore::new();
        store.set(ATTENDANCE_KEY, "{not json").unwrap();

        let ledger: Ledger = load_collection(&store, ATTENDANCE_KEY);
        assert!(ledger.is_empty());

        let strict = try_load_collection::<Ledger>(&store, ATTENDANCE_KEY);
        assert!(matches!(strict, Err(LoadError::Corrupt { ref key, .. }) if key == ATTENDANCE_KEY));
        // Fallback does not overwrite what is stored.
        assert_eq!(store.get(ATTENDANCE_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn empty_collection_is_never_written() {
        let mut store = MemoryStore::new();
        store.set(ATTENDANCE_KEY, "[1]").unwrap();

        assert!(!save_collection(&mut store, ATTENDANCE_KEY, &Ledger::new()).unwrap());
        assert_eq!(store.get(ATTENDANCE_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn save_then_load_ledger() {
        let mut store = MemoryStore::new();
        let mut ledger = Ledger::new();
        ledger.mark("Math", NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), true);

        assert!(save_collection(&mut store, ATTENDANCE_KEY, &ledger).unwrap());
        let loaded: Ledger = load_collection(&store, ATTENDANCE_KEY);
        assert_eq!(loaded, ledger);
    }
}
