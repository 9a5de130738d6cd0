//! JSON file store
//!
//! Writes go to a sibling `.tmp` file first and are renamed into place, so a
//! crash mid-write never leaves a truncated record behind.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::Error as _;

use super::{BestScoreStore, PersistenceError, RunRecord};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best(&mut self) -> Result<u64, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let record: RunRecord = serde_json::from_str(&json)?;
        if record.version > RunRecord::VERSION {
            return Err(PersistenceError::Corrupt(serde_json::Error::custom(format!(
                "record version {} is newer than supported version {}",
                record.version,
                RunRecord::VERSION
            ))));
        }
        Ok(record.best)
    }

    fn save_best(&mut self, best: u64) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&RunRecord::new(best))?;
        let tmp = self.tmp_path();
        let written = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        log::info!("Best score {best} saved to {}", self.path.display());
        Ok(())
    }
}
