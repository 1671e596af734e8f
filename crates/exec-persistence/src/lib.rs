//! exec-persistence
//!
//! Implementación durable de `ExecutionHistoryStore` sobre el filesystem,
//! más utilidades de configuración.
//!
//! Módulos:
//! - `file`: un archivo JSON por identidad, reemplazo atómico vía rename.
//! - `config`: carga de configuración desde .env / entorno.
//! - `error`: errores de persistencia y su mapeo a `HistoryError`.

pub mod config;
pub mod error;
pub mod file;

pub use config::{init_dotenv, HistoryConfig, RetryPolicy};
pub use error::PersistenceError;
pub use file::{FileHistoryStore, StoredRecord};
