//! High-Score Persistence Gateway
//!
//! A narrow string key-value interface the host implements over whatever it
//! has (a save file, LocalStorage, nothing). One key holds the high score
//! as a decimal string. Storage trouble never reaches gameplay: malformed
//! values load as 0 and write failures are logged and swallowed, leaving
//! the session with an in-memory high score for the run.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

/// Storage key for the persisted high score.
pub const HIGH_SCORE_KEY: &str = "high_score";

/// Failure reported by a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached at all
    #[error("storage backend unavailable")]
    Unavailable,

    /// The backend rejected the operation
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Host-implemented key-value persistence.
pub trait PersistenceGateway {
    /// Read a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory reference implementation.
///
/// Used by tests and replays, and by hosts that have no storage; values
/// live only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceGateway for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the persisted high score, defaulting to 0.
///
/// A missing key, a non-numeric value, or a backend failure all load as 0;
/// none of them surface as an error.
pub fn load_high_score(store: &dyn PersistenceGateway) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(raw)) => match raw.trim().parse::<u32>() {
            Ok(value) => value,
            Err(_) => {
                warn!(raw = %raw, "persisted high score is not numeric, defaulting to 0");
                0
            }
        },
        Ok(None) => 0,
        Err(err) => {
            warn!(%err, "failed to load high score, defaulting to 0");
            0
        }
    }
}

/// Persist a new high score, swallowing backend failures.
pub fn store_high_score(store: &mut dyn PersistenceGateway, score: u32) {
    if let Err(err) = store.set(HIGH_SCORE_KEY, &score.to_string()) {
        warn!(%err, score, "failed to persist high score, continuing in-memory");
    }
}
