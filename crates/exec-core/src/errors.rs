//! Errores del core.
//!
//! Todos son `Clone + PartialEq` para poder viajar dentro de
//! `Outcome::Failed` y compararse en tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallo al tomar un snapshot de un valor o de un conjunto de archivos.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum SnapshotError {
    #[error("cannot read '{path}': {message}")] Io { path: String, message: String },
    #[error("cannot serialize value: {0}")] Serialize(String),
    #[error("path is not valid UTF-8: '{0}'")] NonUtf8Path(String),
}

impl SnapshotError {
    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(),
                   message: err.to_string() }
    }
}

/// Fallo del store de historial. Nunca se propaga como fallo del pipeline en
/// lecturas: `History::load` lo degrada a "sin historial".
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum HistoryError {
    #[error("history store unavailable: {0}")] Unavailable(String),
    #[error("corrupt history record: {0}")] Corrupt(String),
    #[error("incompatible history format (expected {expected}, found {found})")]
    IncompatibleFormat { expected: u32, found: u32 },
}

/// Fallo reportado por una unidad de trabajo al ejecutarse.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[error("{message}")]
pub struct WorkError {
    pub message: String,
}

impl WorkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Causa de un `Outcome::Failed`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ExecutionError {
    #[error("fingerprinting failed: {0}")] Fingerprinting(#[from] SnapshotError),
    #[error("execution failed: {0}")] Work(#[from] WorkError),
}
