//! Steps del pipeline de ejecución incremental.
//!
//! Cada step es una función pura de contexto a contexto: lee lo que ya
//! calcularon los anteriores, agrega campos nuevos y entrega la vista
//! extendida al siguiente, o corta la cadena con un `ExecutionResult`.
//! Este módulo define:
//! - `Step`: interfaz común y `StepResult`.
//! - `StepChain`: composición tipada (la salida de un step debe ser la
//!   entrada del siguiente, comprobado en compilación).
//! - Los steps concretos, en el orden en que corren.

mod capture;
pub mod definition;
mod execute;
mod fingerprint;
mod identify;
mod load_state;
pub mod pipeline;
mod run_result;
mod store_state;
mod up_to_date;

pub use capture::CaptureStateStep;
pub use definition::Step;
pub use execute::ExecuteStep;
pub use fingerprint::FingerprintInputsStep;
pub use identify::IdentifyStep;
pub use load_state::LoadExecutionStateStep;
pub use pipeline::{Chain, StepChain};
pub use run_result::{ExecutionResult, Outcome, StepResult};
pub use store_state::StoreExecutionStateStep;
pub use up_to_date::{detect_changes, ResolveUpToDateStep};
