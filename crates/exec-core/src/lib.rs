//! exec-core: núcleo de ejecución incremental.
//!
//! Dada una unidad de trabajo con entradas y salidas declaradas, decide si el
//! resultado anterior puede reutilizarse o si hay que volver a ejecutar, y
//! registra lo necesario para decidirlo barato la próxima vez.
//!
//! Módulos:
//! - `model`: fingerprints, snapshots y la cadena de contextos.
//! - `work`: interfaz `UnitOfWork` y resolución de identidad.
//! - `history`: contrato del store de historial + implementación en memoria.
//! - `step`: los steps del pipeline y su composición tipada.
//! - `engine`: `ExecutionPipeline`, el driver con el orden estándar.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod hashing;
pub mod history;
pub mod model;
pub mod step;
pub mod work;

pub use engine::ExecutionPipeline;
pub use errors::{ExecutionError, HistoryError, SnapshotError, WorkError};
pub use history::{AfterPreviousExecutionState, ExecutionHistoryStore, History, InMemoryHistoryStore};
pub use model::{ExecutionRequestContext, FileCollectionFingerprint, Fingerprint, ValueSnapshot};
pub use step::{ExecutionResult, Outcome, Step, StepChain, StepResult};
pub use work::{Identity, UnitOfWork, WorkOutput, WorkRequest};
