//! Core ExecutionPipeline implementation

use std::sync::Arc;

use log::info;

use crate::errors::HistoryError;
use crate::history::History;
use crate::model::{ExecutionRequestContext, InputFileProperties, InputProperties};
use crate::step::{CaptureStateStep, ExecuteStep, ExecutionResult, FingerprintInputsStep, IdentifyStep,
                  LoadExecutionStateStep, ResolveUpToDateStep, Step, StepChain, StepResult, StoreExecutionStateStep};
use crate::work::UnitOfWork;

type BoxedChain = Box<dyn Step<Input = ExecutionRequestContext, Output = ExecutionResult>>;

/// Pipeline de ejecución incremental.
///
/// Orden fijo: identify -> load history -> fingerprint -> up-to-date ->
/// execute -> capture -> store. La cadena se arma una sola vez al construir
/// el pipeline; cada corrida es síncrona y no guarda estado, así que un mismo
/// pipeline puede usarse desde varios hilos para identidades distintas.
pub struct ExecutionPipeline {
    history: Option<History>,
    chain: BoxedChain,
}

impl ExecutionPipeline {
    /// Crea el pipeline con el historial que recibirán las identidades que lo
    /// soliciten (`None` desactiva el comportamiento incremental).
    pub fn new(history: Option<History>) -> Self {
        let chain = StepChain::new(IdentifyStep::new(history.clone())).then(LoadExecutionStateStep)
                                                                      .then(FingerprintInputsStep)
                                                                      .then(ResolveUpToDateStep)
                                                                      .then(ExecuteStep)
                                                                      .then(CaptureStateStep)
                                                                      .then(StoreExecutionStateStep)
                                                                      .build();
        Self { history,
               chain: Box::new(chain) }
    }

    #[inline]
    pub fn with_history(history: History) -> Self {
        Self::new(Some(history))
    }

    #[inline]
    pub fn without_history() -> Self {
        Self::new(None)
    }

    /// Corre el pipeline completo para un pedido y devuelve su resultado.
    pub fn execute(&self, request: ExecutionRequestContext) -> ExecutionResult {
        let name = request.work().display_name().to_string();
        let result = match self.chain.execute(request) {
            StepResult::Continue(result) | StepResult::Finished(result) => result,
        };
        info!("{name}: {}", result.outcome);
        result
    }

    /// Atajo para ejecutar una unidad sin razón de rebuild.
    pub fn run(&self, work: Arc<dyn UnitOfWork>) -> ExecutionResult {
        self.execute(ExecutionRequestContext::new(work))
    }

    /// Borra el registro de `work`, forzando una ejecución completa en la
    /// próxima corrida. Devuelve `false` si la unidad no tiene historial.
    pub fn invalidate(&self, work: &dyn UnitOfWork) -> Result<bool, HistoryError> {
        let Some(history) = self.history.as_ref().filter(|_| work.tracks_history()) else {
            return Ok(false);
        };
        let identity = work.identify(&InputProperties::new(), &InputFileProperties::new());
        history.remove(identity.unique_id())?;
        info!("{}: history record removed", work.display_name());
        Ok(true)
    }
}

impl std::fmt::Debug for ExecutionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionPipeline").finish_non_exhaustive()
    }
}
