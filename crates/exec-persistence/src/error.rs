//! Errores de persistencia.
//! Mapea errores de IO / serde a variantes semánticas y, en el borde del
//! trait, a `HistoryError` del core.

use std::io;
use std::path::PathBuf;

use exec_core::HistoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("incompatible record format (expected {expected}, found {found})")]
    IncompatibleFormat { expected: u32, found: u32 },
    #[error("record for '{found}' stored under key '{expected}'")]
    KeyMismatch { expected: String, found: String },
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Errores transitorios (recomendado reintentar con backoff).
    pub fn is_retryable(&self) -> bool {
        match self {
            PersistenceError::Io { source, .. } => is_transient(source.kind()),
            _ => false,
        }
    }
}

pub(crate) fn is_transient(kind: io::ErrorKind) -> bool {
    matches!(kind,
             io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

impl From<PersistenceError> for HistoryError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Io { .. } => HistoryError::Unavailable(err.to_string()),
            PersistenceError::Encoding(e) => HistoryError::Corrupt(e.to_string()),
            PersistenceError::IncompatibleFormat { expected, found } => HistoryError::IncompatibleFormat { expected, found },
            PersistenceError::KeyMismatch { .. } => HistoryError::Corrupt(err.to_string()),
        }
    }
}
