//! Store de historial sobre el filesystem.
//!
//! Layout: `<root>/<2 hex>/<blake3(unique_id)>.json`, un registro por
//! identidad. La escritura va a un temporal con nombre único en el mismo
//! directorio y se publica con `rename`, así que un lector ve el registro
//! viejo o el nuevo completo, nunca uno truncado.

mod retry;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use exec_core::constants::HISTORY_FORMAT_VERSION;
use exec_core::hashing::hash_str;
use exec_core::{AfterPreviousExecutionState, ExecutionHistoryStore, HistoryError};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{HistoryConfig, RetryPolicy};
use crate::error::PersistenceError;
use retry::with_retry;

/// Registro tal como queda en disco.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub format_version: u32,
    pub unique_id: String,
    pub state: AfterPreviousExecutionState,
}

// Sólo la cabecera: permite rechazar versiones ajenas sin decodificar el resto.
#[derive(Deserialize)]
struct RecordHeader {
    format_version: u32,
}

#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    root: PathBuf,
    retry: RetryPolicy,
}

impl FileHistoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(),
               retry: RetryPolicy::default() }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self { root: config.dir.clone(),
               retry: config.retry }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ruta del registro de `unique_id` (exista o no).
    pub fn record_path(&self, unique_id: &str) -> PathBuf {
        let key = hash_str(unique_id);
        self.root.join(&key[..2]).join(format!("{key}.json"))
    }

    fn read_record(&self, unique_id: &str) -> Result<Option<AfterPreviousExecutionState>, PersistenceError> {
        let path = self.record_path(unique_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(path, e)),
        };
        let header: RecordHeader = serde_json::from_slice(&bytes)?;
        if header.format_version != HISTORY_FORMAT_VERSION {
            return Err(PersistenceError::IncompatibleFormat { expected: HISTORY_FORMAT_VERSION,
                                                              found: header.format_version });
        }
        let record: StoredRecord = serde_json::from_slice(&bytes)?;
        if record.unique_id != unique_id {
            return Err(PersistenceError::KeyMismatch { expected: unique_id.to_string(),
                                                       found: record.unique_id });
        }
        Ok(Some(record.state))
    }

    fn write_record(&self, unique_id: &str, state: &AfterPreviousExecutionState) -> Result<(), PersistenceError> {
        let path = self.record_path(unique_id);
        let dir = path.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;

        let record = StoredRecord { format_version: HISTORY_FORMAT_VERSION,
                                    unique_id: unique_id.to_string(),
                                    state: state.clone() };
        let payload = serde_json::to_vec_pretty(&record)?;

        let tmp = dir.join(format!(".{}.tmp", Uuid::new_v4()));
        let written = write_synced(&tmp, &payload).and_then(|_| fs::rename(&tmp, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(PersistenceError::io(path, e));
        }
        debug!("history record for {unique_id} written to {}", path.display());
        Ok(())
    }

    fn delete_record(&self, unique_id: &str) -> Result<(), PersistenceError> {
        let path = self.record_path(unique_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::io(path, e)),
        }
    }
}

fn write_synced(path: &Path, payload: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

impl ExecutionHistoryStore for FileHistoryStore {
    fn load(&self, unique_id: &str) -> Result<Option<AfterPreviousExecutionState>, HistoryError> {
        with_retry(self.retry, || self.read_record(unique_id)).map_err(HistoryError::from)
    }

    fn store(&self, unique_id: &str, state: &AfterPreviousExecutionState) -> Result<(), HistoryError> {
        with_retry(self.retry, || self.write_record(unique_id, state)).map_err(HistoryError::from)
    }

    fn remove(&self, unique_id: &str) -> Result<(), HistoryError> {
        with_retry(self.retry, || self.delete_record(unique_id)).map_err(HistoryError::from)
    }
}
