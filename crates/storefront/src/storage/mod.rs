//! Persistent key-value storage.
//!
//! The original site kept all funnel state in browser local storage: string
//! keys, JSON string values, synchronous writes. [`KeyValueStore`] is the
//! injected equivalent, so the funnel logic never touches a concrete backend
//! directly and tests can run against [`MemoryStore`].
//!
//! Failure semantics follow the site's behavior: a malformed stored blob is
//! treated as absent (fail-soft with a warning), and a failed write leaves the
//! prior persisted value in place - mutation paths warn and continue rather
//! than abort.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Contracted storage keys.
///
/// These spellings are the persisted interface; changing one orphans every
/// returning visitor's saved state.
pub mod keys {
    /// The permanent services cart, distinct from the in-progress booking.
    pub const SERVICES_CART: &str = "kushiServicesCart";
    /// The transient booking session, scoped to the active booking flow.
    pub const BOOKING_SESSION: &str = "kushiBookingSession";
    /// Booking form snapshot for resuming an interrupted booking.
    pub const BOOKING_FORM: &str = "kushiBookingFormData";
    /// Authenticated-user snapshot.
    pub const USER: &str = "kushiUser";
    /// Bearer token from the auth API.
    pub const TOKEN: &str = "kushiToken";
}

/// Errors from the storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be serialized or parsed.
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The in-process lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String-keyed durable storage.
///
/// Values are opaque strings (JSON blobs by convention). Writes are assumed
/// atomic per key; there is no transaction or schema enforcement.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the prior value must remain.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, used as the test double and the default backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Durable store backed by a single JSON object file.
///
/// The whole map is read on open and rewritten on every mutation - the same
/// write-through shape local storage gave the original site.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        let prior = entries.insert(key.to_owned(), value.to_owned());
        if let Err(err) = self.flush(&entries) {
            // Keep the in-memory map consistent with what is on disk.
            match prior {
                Some(old) => entries.insert(key.to_owned(), old),
                None => entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        let prior = entries.remove(key);
        if let Err(err) = self.flush(&entries) {
            if let Some(old) = prior {
                entries.insert(key.to_owned(), old);
            }
            return Err(err);
        }
        Ok(())
    }
}

/// Read and deserialize the JSON value under `key`, falling back to the
/// default on a missing key, a read failure, or malformed JSON.
pub fn read_json_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(key, error = %err, "malformed stored value, treating as empty");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!(key, error = %err, "storage read failed, treating as empty");
            T::default()
        }
    }
}

/// Serialize `value` and write it under `key`.
///
/// A failed write (quota, I/O) is non-fatal: the prior persisted value stays
/// in place and a warning is emitted.
pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(err) = store.set(key, &raw) {
                tracing::warn!(key, error = %err, "storage write failed, keeping prior value");
            }
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "could not serialize value for storage");
        }
    }
}

/// Remove `key`, warning instead of failing if the backend write fails.
pub fn remove_key(store: &dyn KeyValueStore, key: &str) {
    if let Err(err) = store.remove(key) {
        tracing::warn!(key, error = %err, "storage remove failed");
    }
}
