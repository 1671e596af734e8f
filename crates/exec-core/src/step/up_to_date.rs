use std::collections::BTreeMap;

use log::debug;

use super::{Step, StepResult};
use crate::constants::{MAX_CHANGE_REASONS, NO_HISTORY};
use crate::history::{AfterPreviousExecutionState, BeforeExecutionState};
use crate::model::{BeforeExecutionContext, UpToDateContext, UpToDateDecision};

const UNCHANGED: &str = "inputs and outputs unchanged since previous execution";
const PREVIOUS_FAILED: &str = "previous execution failed";

/// Decide si la ejecución anterior sigue siendo válida.
///
/// Orden de evaluación:
/// 1. Una razón de rebuild en el contexto gana siempre.
/// 2. Sin estado previo => `"no history"`.
/// 3. Estado previo no exitoso => fuera de fecha.
/// 4. Comparación campo a campo de implementación, propiedades, archivos de
///    entrada y salidas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveUpToDateStep;

impl Step for ResolveUpToDateStep {
    type Input = BeforeExecutionContext;
    type Output = UpToDateContext;

    fn execute(&self, context: BeforeExecutionContext) -> StepResult<UpToDateContext> {
        let decision = decide(context.rebuild_reason.as_deref(),
                              context.after_previous_execution_state.as_ref(),
                              &context.before_execution_state);
        debug!("{}: {:?}", context.identity.unique_id(), decision);
        StepResult::Continue(UpToDateContext::new(context, decision))
    }
}

pub(crate) fn decide(rebuild_reason: Option<&str>,
                     previous: Option<&AfterPreviousExecutionState>,
                     current: &BeforeExecutionState)
                     -> UpToDateDecision {
    if let Some(reason) = rebuild_reason {
        return UpToDateDecision::OutOfDate { reasons: vec![reason.to_string()] };
    }
    let Some(previous) = previous else {
        return UpToDateDecision::OutOfDate { reasons: vec![NO_HISTORY.to_string()] };
    };
    if !previous.successful {
        return UpToDateDecision::OutOfDate { reasons: vec![PREVIOUS_FAILED.to_string()] };
    }
    let reasons = detect_changes(previous, current);
    if reasons.is_empty() {
        UpToDateDecision::UpToDate { reason: UNCHANGED.to_string() }
    } else {
        UpToDateDecision::OutOfDate { reasons }
    }
}

/// Lista (acotada a `MAX_CHANGE_REASONS`) de diferencias entre el estado
/// registrado y el actual. Vacía si todo coincide.
pub fn detect_changes(previous: &AfterPreviousExecutionState, current: &BeforeExecutionState) -> Vec<String> {
    let mut reasons = Vec::new();
    if previous.implementation != current.implementation {
        reasons.push("implementation has changed".to_string());
    }
    compare("input property", &previous.input_properties, &current.input_properties, &mut reasons);
    compare("input file property",
            &previous.input_file_properties,
            &current.input_file_properties,
            &mut reasons);
    compare("output property", &previous.output_files, &current.output_files, &mut reasons);
    reasons.truncate(MAX_CHANGE_REASONS);
    reasons
}

fn compare<V: PartialEq>(kind: &str, previous: &BTreeMap<String, V>, current: &BTreeMap<String, V>, reasons: &mut Vec<String>) {
    for (name, value) in current {
        match previous.get(name) {
            None => reasons.push(format!("{kind} '{name}' has been added")),
            Some(old) if old != value => reasons.push(format!("{kind} '{name}' has changed")),
            Some(_) => {}
        }
    }
    for name in previous.keys().filter(|name| !current.contains_key(*name)) {
        reasons.push(format!("{kind} '{name}' has been removed"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::OriginMetadata;
    use crate::model::{FileCollectionFingerprint, Fingerprint, ValueSnapshot};
    use serde_json::json;

    fn before(version: &str) -> BeforeExecutionState {
        let mut input_properties = crate::model::InputProperties::new();
        input_properties.insert("version".into(), ValueSnapshot::from_json(&json!(version)));
        let mut output_files = crate::model::OutputFileProperties::new();
        output_files.insert("out".into(),
                            FileCollectionFingerprint::from_entries(vec![("out.txt".into(), Fingerprint::of_str(version))]));
        BeforeExecutionState { implementation: ValueSnapshot::from_json(&json!("impl")),
                               input_properties,
                               input_file_properties: Default::default(),
                               output_files }
    }

    fn recorded(current: &BeforeExecutionState) -> AfterPreviousExecutionState {
        AfterPreviousExecutionState::new(current, current.output_files.clone(), true, OriginMetadata::new(0))
    }

    #[test]
    fn unchanged_state_is_up_to_date() {
        let current = before("1.0");
        let previous = recorded(&current);
        assert!(decide(None, Some(&previous), &current).is_up_to_date());
    }

    #[test]
    fn rebuild_reason_wins_over_equal_fingerprints() {
        let current = before("1.0");
        let previous = recorded(&current);
        let decision = decide(Some("forced"), Some(&previous), &current);
        assert_eq!(decision, UpToDateDecision::OutOfDate { reasons: vec!["forced".into()] });
    }

    #[test]
    fn missing_history_reports_no_history() {
        let decision = decide(None, None, &before("1.0"));
        assert_eq!(decision.reason(), NO_HISTORY);
    }

    #[test]
    fn failed_previous_state_is_never_reused() {
        let current = before("1.0");
        let mut previous = recorded(&current);
        previous.successful = false;
        assert_eq!(decide(None, Some(&previous), &current).reason(), PREVIOUS_FAILED);
    }

    #[test]
    fn changes_are_reported_per_property() {
        let previous = recorded(&before("1.0"));
        let mut current = before("1.1");
        current.input_properties.insert("extra".into(), ValueSnapshot::from_json(&json!(true)));
        let reasons = detect_changes(&previous, &current);
        assert_eq!(reasons,
                   vec!["input property 'extra' has been added".to_string(),
                        "input property 'version' has changed".to_string(),
                        "output property 'out' has changed".to_string()]);
    }

    #[test]
    fn removed_property_is_detected() {
        let previous = recorded(&before("1.0"));
        let mut current = before("1.0");
        current.input_properties.clear();
        assert_eq!(detect_changes(&previous, &current), vec!["input property 'version' has been removed".to_string()]);
    }
}
