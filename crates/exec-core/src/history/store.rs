use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, warn};

use super::AfterPreviousExecutionState;
use crate::constants::HISTORY_FORMAT_VERSION;
use crate::errors::HistoryError;

/// Almacenamiento clave-valor del último estado conocido por identidad.
///
/// Contrato:
/// - `load` devuelve `Ok(None)` si no hay registro.
/// - `store` reemplaza el registro completo de forma atómica: un `load`
///   concurrente ve el registro viejo o el nuevo, nunca uno a medias.
/// - Operaciones sobre identidades distintas son independientes. Nunca se
///   invoca concurrentemente para la misma identidad.
pub trait ExecutionHistoryStore: Send + Sync {
    fn load(&self, unique_id: &str) -> Result<Option<AfterPreviousExecutionState>, HistoryError>;
    fn store(&self, unique_id: &str, state: &AfterPreviousExecutionState) -> Result<(), HistoryError>;
    fn remove(&self, unique_id: &str) -> Result<(), HistoryError>;
}

/// Implementación en memoria. Cada identidad vive en su propio shard del
/// `DashMap`, así que escrituras de identidades distintas no se bloquean.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    inner: DashMap<String, AfterPreviousExecutionState>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ExecutionHistoryStore for InMemoryHistoryStore {
    fn load(&self, unique_id: &str) -> Result<Option<AfterPreviousExecutionState>, HistoryError> {
        Ok(self.inner.get(unique_id).map(|entry| entry.value().clone()))
    }

    fn store(&self, unique_id: &str, state: &AfterPreviousExecutionState) -> Result<(), HistoryError> {
        self.inner.insert(unique_id.to_string(), state.clone());
        Ok(())
    }

    fn remove(&self, unique_id: &str) -> Result<(), HistoryError> {
        self.inner.remove(unique_id);
        Ok(())
    }
}

/// Handle al historial que viaja dentro de `Identity`.
///
/// Es la única vía de acceso al store desde el pipeline. Clonarlo es barato
/// (comparte el mismo `Arc`).
#[derive(Clone)]
pub struct History {
    store: Arc<dyn ExecutionHistoryStore>,
}

impl History {
    pub fn new<S: ExecutionHistoryStore + 'static>(store: S) -> Self {
        Self { store: Arc::new(store) }
    }

    pub fn from_arc(store: Arc<dyn ExecutionHistoryStore>) -> Self {
        Self { store }
    }

    /// Carga el estado previo. Errores de lectura y versiones de formato
    /// incompatibles se degradan a `None`: fuerzan una ejecución completa pero
    /// nunca hacen fallar el pipeline.
    pub fn load(&self, unique_id: &str) -> Option<AfterPreviousExecutionState> {
        match self.store.load(unique_id) {
            Ok(Some(state)) if state.format_version == HISTORY_FORMAT_VERSION => Some(state),
            Ok(Some(state)) => {
                warn!("history for {unique_id} has format version {} (expected {}), ignoring it",
                      state.format_version,
                      HISTORY_FORMAT_VERSION);
                None
            }
            Ok(None) => {
                debug!("no history recorded for {unique_id}");
                None
            }
            Err(e) => {
                warn!("could not load history for {unique_id}: {e}");
                None
            }
        }
    }

    pub fn store(&self, unique_id: &str, state: &AfterPreviousExecutionState) -> Result<(), HistoryError> {
        self.store.store(unique_id, state)
    }

    pub fn remove(&self, unique_id: &str) -> Result<(), HistoryError> {
        self.store.remove(unique_id)
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History").finish_non_exhaustive()
    }
}
