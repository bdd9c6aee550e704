//! Keyed JSON records for feature state.
//!
//! Each feature owns exactly one record. Reads happen once at startup; writes
//! happen synchronously after every mutation.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, DatabaseError};

/// Storage key for the task list.
pub const TASKS_KEY: &str = "studyTracker_tasks";
/// Storage key for the streak record.
pub const STREAK_KEY: &str = "studyTracker_streak";
/// Storage key for the CGPA ledger.
pub const CGPA_KEY: &str = "studyTracker_cgpa";

/// A simple string key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DatabaseError>;
    fn remove(&mut self, key: &str) -> Result<(), DatabaseError>;
}

/// In-process store backed by a map. Nothing outlives the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DatabaseError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Load a record, falling back to `T::default()`.
///
/// A missing key yields the default silently. A record that fails to parse is
/// logged and also yields the default; only store failures propagate.
pub fn load_state<T>(store: &dyn KvStore, key: &str) -> Result<T, CoreError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable stored state");
            Ok(T::default())
        }
    }
}

/// Serialize and write a record.
pub fn save_state<T>(store: &mut dyn KvStore, key: &str, value: &T) -> Result<(), CoreError>
where
    T: Serialize,
{
    let json = serde_json::to_string(value)?;
    tracing::debug!(key, bytes = json.len(), "persisting state");
    store.set(key, &json)?;
    Ok(())
}
