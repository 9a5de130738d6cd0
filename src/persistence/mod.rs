//! Best-score persistence
//!
//! The simulation owns the best score in memory and only hands it to a store
//! when a run ends. Stores can fail; callers log and carry on.

mod file;

pub use file::JsonFileStore;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Versioned on-disk record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(default = "RunRecord::current_version")]
    pub version: u32,
    pub best: u64,
}

impl RunRecord {
    pub const VERSION: u32 = 1;

    fn current_version() -> u32 {
        Self::VERSION
    }

    pub fn new(best: u64) -> Self {
        Self {
            version: Self::VERSION,
            best,
        }
    }
}

/// Why a store could not load or save
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Corrupt(serde_json::Error),
    /// The store refuses to persist (read-only, quota exceeded, ...)
    Unavailable(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(err) => write!(f, "storage I/O failed: {err}"),
            PersistenceError::Corrupt(err) => write!(f, "stored record is corrupt: {err}"),
            PersistenceError::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Corrupt(err) => Some(err),
            PersistenceError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Corrupt(err)
    }
}

/// Where the best score lives between sessions
pub trait BestScoreStore {
    /// Best score from a previous session (0 when nothing was stored yet)
    fn load_best(&mut self) -> Result<u64, PersistenceError>;

    fn save_best(&mut self, best: u64) -> Result<(), PersistenceError>;
}

/// Load the stored best, falling back to 0 if the store fails
pub fn load_best_or_default(store: &mut dyn BestScoreStore) -> u64 {
    match store.load_best() {
        Ok(best) => {
            log::info!("Loaded best score {best}");
            best
        }
        Err(err) => {
            log::warn!("Could not load best score, starting from 0: {err}");
            0
        }
    }
}

/// Volatile store for tests and sessions without storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
    /// Make every save fail, to exercise the error path
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u64) -> Self {
        Self {
            best: Some(best),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<u64> {
        self.best
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best(&mut self) -> Result<u64, PersistenceError> {
        Ok(self.best.unwrap_or(0))
    }

    fn save_best(&mut self, best: u64) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Unavailable("saves disabled".into()));
        }
        self.best = Some(best);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_best().unwrap(), 0);
        store.save_best(420).unwrap();
        assert_eq!(store.load_best().unwrap(), 420);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_failing_store_falls_back() {
        struct Broken;
        impl BestScoreStore for Broken {
            fn load_best(&mut self) -> Result<u64, PersistenceError> {
                Err(PersistenceError::Unavailable("offline".into()))
            }
            fn save_best(&mut self, _best: u64) -> Result<(), PersistenceError> {
                Err(PersistenceError::Unavailable("offline".into()))
            }
        }
        assert_eq!(load_best_or_default(&mut Broken), 0);
    }

    #[test]
    fn test_record_without_version_defaults() {
        let record: RunRecord = serde_json::from_str(r#"{ "best": 77 }"#).unwrap();
        assert_eq!(record, RunRecord::new(77));
    }
}
