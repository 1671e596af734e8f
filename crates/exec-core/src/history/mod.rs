//! Contrato del store de historial de ejecución y handle `History`.

mod state;
mod store;

pub use state::{AfterPreviousExecutionState, BeforeExecutionState, OriginMetadata};
pub use store::{ExecutionHistoryStore, History, InMemoryHistoryStore};
