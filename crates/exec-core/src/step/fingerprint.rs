use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{debug, warn};

use super::{Step, StepResult};
use crate::errors::SnapshotError;
use crate::history::BeforeExecutionState;
use crate::model::{BeforeExecutionContext, FileCollectionFingerprint, InputProperties, PreviousExecutionContext,
                   ValueSnapshot};
use crate::step::ExecutionResult;

/// Fingerprintea los valores actuales de la unidad: implementación,
/// propiedades de entrada, archivos de entrada y salidas antes de ejecutar.
/// Es el material que el step de up-to-date compara contra el historial.
///
/// Un archivo ilegible corta el pipeline con `Failed`; no se toca el
/// historial.
#[derive(Debug, Clone, Copy, Default)]
pub struct FingerprintInputsStep;

impl Step for FingerprintInputsStep {
    type Input = PreviousExecutionContext;
    type Output = BeforeExecutionContext;

    fn execute(&self, context: PreviousExecutionContext) -> StepResult<BeforeExecutionContext> {
        let work = context.work();
        let implementation = ValueSnapshot::from_json(&work.implementation());
        let input_properties: InputProperties = work.input_properties()
                                                    .iter()
                                                    .map(|(name, value)| (name.clone(), ValueSnapshot::from_json(value)))
                                                    .collect();
        let fingerprinted = snapshot_file_properties(work.input_files())
            .and_then(|inputs| snapshot_file_properties(work.output_files()).map(|outputs| (inputs, outputs)));
        let (input_file_properties, output_files) = match fingerprinted {
            Ok(files) => files,
            Err(e) => {
                warn!("{}: could not fingerprint inputs: {e}", work.display_name());
                return StepResult::Finished(ExecutionResult::failed(e, context.identity.unique_id()));
            }
        };
        debug!("{}: fingerprinted {} input properties, {} input file properties, {} output properties",
               work.display_name(),
               input_properties.len(),
               input_file_properties.len(),
               output_files.len());
        let before = BeforeExecutionState { implementation,
                                            input_properties,
                                            input_file_properties,
                                            output_files };
        StepResult::Continue(BeforeExecutionContext::new(context, before))
    }
}

/// Snapshot de cada colección declarada (`nombre -> rutas`).
pub(crate) fn snapshot_file_properties(declared: BTreeMap<String, Vec<PathBuf>>)
                                       -> Result<BTreeMap<String, FileCollectionFingerprint>, SnapshotError> {
    declared.into_iter()
            .map(|(name, roots)| FileCollectionFingerprint::snapshot(&roots).map(|fp| (name, fp)))
            .collect()
}
