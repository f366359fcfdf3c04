//! Persistence adapter: a durable key-value store holding one JSON blob per ledger.
//!
//! A missing or malformed blob is reported as absent so the ledgers can fall
//! back to their seed data. Read failures are passed on to the caller.

mod database;
mod file;
mod memory;

pub use database::DatabaseStore;
pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(test)]
pub use memory::FaultyStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::error::Result;

/// Logical keys under which the ledgers are persisted.
pub mod keys {
    pub const EMPLOYEES: &str = "employees";
    /// Highest employee ID ever issued, kept apart from the roster blob.
    pub const EMPLOYEE_ID_HIGH_WATER: &str = "employee_id_high_water";
    pub const ATTENDANCE: &str = "attendanceRecords";
    pub const TOTAL_PAYROLL: &str = "total_payroll";
    pub const LEAVE_REQUESTS: &str = "leave_requests";
    pub const PERFORMANCE_REVIEWS: &str = "performance_reviews";
}

/// Where a ledger's initial snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Decoded from the store.
    Persisted,
    /// Built from bundled fixtures because the store had nothing usable.
    Seeded,
}

/// Durable key-value storage for JSON text.
pub trait Store {
    /// Raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Decode the blob under `key`.
///
/// Absent and malformed blobs yield `Ok(None)`. A failed read is an error, so
/// callers never mistake an unreachable store for an empty one.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        debug!("No persisted value for {key}");
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Malformed persisted value for {key}, treating as absent: {e}");
            Ok(None)
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Open the store selected in the configuration.
pub fn open(config: &AppConfig) -> Result<Box<dyn Store>> {
    let store: Box<dyn Store> = match config.storage.backend {
        StorageBackend::Memory => Box::new(MemoryStore::new()),
        StorageBackend::File => Box::new(FileStore::open(config.storage.resolved_data_dir())?),
        StorageBackend::Database => Box::new(DatabaseStore::connect(&config.database)?),
    };
    Ok(store)
}
