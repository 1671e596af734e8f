use log::debug;

use super::{Step, StepResult};
use crate::model::{IdentityContext, PreviousExecutionContext};

/// Carga el estado de la ejecución anterior a través de `identity.history`.
/// Sin historial, sin registro o con error de lectura el estado queda ausente.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadExecutionStateStep;

impl Step for LoadExecutionStateStep {
    type Input = IdentityContext;
    type Output = PreviousExecutionContext;

    fn execute(&self, context: IdentityContext) -> StepResult<PreviousExecutionContext> {
        let identity = &context.identity;
        let previous = identity.history().and_then(|history| history.load(identity.unique_id()));
        debug!("{}: previous execution state {}",
               identity.unique_id(),
               if previous.is_some() { "loaded" } else { "absent" });
        StepResult::Continue(PreviousExecutionContext::new(context, previous))
    }
}
