use log::warn;

use super::fingerprint::snapshot_file_properties;
use super::{ExecutionResult, Step, StepResult};
use crate::history::{AfterPreviousExecutionState, OriginMetadata};
use crate::model::{CapturedContext, ExecutedContext, ExecutionStatus};

/// Fingerprintea las salidas recién producidas y arma el nuevo
/// `AfterPreviousExecutionState`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureStateStep;

impl Step for CaptureStateStep {
    type Input = ExecutedContext;
    type Output = CapturedContext;

    fn execute(&self, context: ExecutedContext) -> StepResult<CapturedContext> {
        let output_files = match snapshot_file_properties(context.work().output_files()) {
            Ok(files) => files,
            Err(e) => {
                warn!("{}: could not fingerprint outputs: {e}", context.work().display_name());
                let unique_id = context.identity.unique_id();
                // La causa original de un fallo tiene prioridad sobre la del snapshot.
                let result = match &context.execution {
                    ExecutionStatus::FailedWithPartialResults { cause, .. } => ExecutionResult::failed(cause.clone(), unique_id),
                    ExecutionStatus::Completed { .. } => ExecutionResult::failed(e, unique_id),
                };
                return StepResult::Finished(result);
            }
        };
        let successful = matches!(context.execution, ExecutionStatus::Completed { .. });
        let state = AfterPreviousExecutionState::new(&context.before_execution_state,
                                                     output_files,
                                                     successful,
                                                     OriginMetadata::new(context.execution.execution_time_ms()));
        StepResult::Continue(CapturedContext::new(context, state))
    }
}
