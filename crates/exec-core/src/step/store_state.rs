use log::{debug, warn};

use super::{ExecutionResult, Outcome, Step, StepResult};
use crate::model::{CapturedContext, ExecutionStatus};
use crate::work::WorkOutput;

/// Último step: traduce la ejecución a `Outcome` y, si la identidad tiene
/// historial, reemplaza el registro anterior por el recién capturado.
///
/// Un error de escritura queda en `history_write_error` y en el log; el
/// `outcome` no cambia.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreExecutionStateStep;

impl Step for StoreExecutionStateStep {
    type Input = CapturedContext;
    type Output = ExecutionResult;

    fn execute(&self, context: CapturedContext) -> StepResult<ExecutionResult> {
        let reason = context.decision.reason();
        let outcome = match &context.execution {
            ExecutionStatus::Completed { output: WorkOutput::DidWork, .. } => Outcome::Executed { reason },
            ExecutionStatus::Completed { output: WorkOutput::DidNoWork, .. } => {
                Outcome::Skipped { reason: format!("no work to do ({reason})") }
            }
            ExecutionStatus::FailedWithPartialResults { cause, .. } => Outcome::Failed { cause: cause.clone() },
        };
        let identity = &context.identity;
        let mut result = ExecutionResult::new(outcome, identity.unique_id()).with_state(context.after_execution_state.clone());
        if let Some(history) = identity.history() {
            match history.store(identity.unique_id(), &context.after_execution_state) {
                Ok(()) => {
                    debug!("{}: execution state stored", identity.unique_id());
                    result.history_stored = true;
                }
                Err(e) => {
                    warn!("{}: could not store execution state: {e}", identity.unique_id());
                    result.history_write_error = Some(e);
                }
            }
        }
        StepResult::Continue(result)
    }
}
