use std::time::Instant;

use log::{info, warn};

use super::{ExecutionResult, Outcome, Step, StepResult};
use crate::errors::ExecutionError;
use crate::model::{ExecutedContext, ExecutionStatus, UpToDateContext, UpToDateDecision};
use crate::work::WorkRequest;

/// Ejecuta la unidad de trabajo o la salta si está up-to-date.
///
/// - Up-to-date: termina la cadena sin invocar la unidad, reutilizando el
///   estado previo. No se escribe historial.
/// - Fallo: termina la cadena con `Failed`, salvo que la unidad declare sus
///   resultados parciales cacheables (entonces sigue hacia captura).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteStep;

impl Step for ExecuteStep {
    type Input = UpToDateContext;
    type Output = ExecutedContext;

    fn execute(&self, context: UpToDateContext) -> StepResult<ExecutedContext> {
        let unique_id = context.identity.unique_id().to_string();
        let execution = match &context.decision {
            UpToDateDecision::UpToDate { reason } => {
                info!("{} is up to date: {reason}", context.work().display_name());
                let mut result = ExecutionResult::new(Outcome::UpToDate { reason: reason.clone() }, unique_id);
                result.execution_state = context.after_previous_execution_state.clone();
                return StepResult::Finished(result);
            }
            UpToDateDecision::OutOfDate { reasons } => {
                let work = context.work();
                info!("executing {}: {}", work.display_name(), reasons.join("; "));
                let request = WorkRequest { reasons,
                                            previous_state: context.after_previous_execution_state.as_ref() };
                let started = Instant::now();
                let outcome = work.execute(&request);
                let execution_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                match outcome {
                    Ok(output) => ExecutionStatus::Completed { output, execution_time_ms },
                    Err(e) if work.partial_results_cacheable() => {
                        warn!("{} failed, keeping partial results: {e}", work.display_name());
                        ExecutionStatus::FailedWithPartialResults { cause: ExecutionError::Work(e),
                                                                    execution_time_ms }
                    }
                    Err(e) => {
                        warn!("{} failed: {e}", work.display_name());
                        return StepResult::Finished(ExecutionResult::failed(e, unique_id));
                    }
                }
            }
        };
        StepResult::Continue(ExecutedContext::new(context, execution))
    }
}
