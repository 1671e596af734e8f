use log::debug;

use super::{Step, StepResult};
use crate::history::History;
use crate::model::{ExecutionRequestContext, IdentityContext, InputFileProperties, InputProperties};

/// Resuelve la identidad de la unidad de trabajo.
///
/// Los mapas de identidad son siempre vacíos en este punto: la identidad sale
/// sólo de lo que la unidad declara como característico. El handle de
/// historial se adjunta únicamente si la unidad participa del comportamiento
/// incremental.
#[derive(Debug, Clone)]
pub struct IdentifyStep {
    history: Option<History>,
}

impl IdentifyStep {
    pub fn new(history: Option<History>) -> Self {
        Self { history }
    }
}

impl Step for IdentifyStep {
    type Input = ExecutionRequestContext;
    type Output = IdentityContext;

    fn execute(&self, context: ExecutionRequestContext) -> StepResult<IdentityContext> {
        let input_properties = InputProperties::new();
        let input_file_properties = InputFileProperties::new();
        let work = context.work();
        let history = if work.tracks_history() { self.history.clone() } else { None };
        let identity = work.identify(&input_properties, &input_file_properties).with_history(history);
        debug!("identified {} as {} (history: {})",
               work.display_name(),
               identity.unique_id(),
               identity.history().is_some());
        StepResult::Continue(IdentityContext::new(context, identity, input_properties, input_file_properties))
    }
}
