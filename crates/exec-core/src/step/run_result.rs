use std::fmt;

use crate::errors::{ExecutionError, HistoryError};
use crate::history::AfterPreviousExecutionState;

/// Qué pasó en una corrida del pipeline. Exactamente uno por corrida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Executed { reason: String },
    UpToDate { reason: String },
    Skipped { reason: String },
    Failed { cause: ExecutionError },
}

impl Outcome {
    /// Texto legible para diagnóstico y análisis de cache misses.
    pub fn reason(&self) -> String {
        match self {
            Outcome::Executed { reason } | Outcome::UpToDate { reason } | Outcome::Skipped { reason } => reason.clone(),
            Outcome::Failed { cause } => cause.to_string(),
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        matches!(self, Outcome::UpToDate { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Executed { .. } => "EXECUTED",
            Outcome::UpToDate { .. } => "UP-TO-DATE",
            Outcome::Skipped { .. } => "SKIPPED",
            Outcome::Failed { .. } => "FAILED",
        };
        write!(f, "{label} ({})", self.reason())
    }
}

/// Resultado entregado al caller por la cabeza del pipeline.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub outcome: Outcome,
    pub unique_id: String,
    /// Estado que describe las salidas vigentes: el recién capturado si se
    /// ejecutó, el previo reutilizado si estaba up-to-date.
    pub execution_state: Option<AfterPreviousExecutionState>,
    /// `true` si se escribió un registro nuevo en el historial.
    pub history_stored: bool,
    /// Error al escribir el historial. No invalida el `outcome`.
    pub history_write_error: Option<HistoryError>,
}

impl ExecutionResult {
    pub fn new(outcome: Outcome, unique_id: impl Into<String>) -> Self {
        Self { outcome,
               unique_id: unique_id.into(),
               execution_state: None,
               history_stored: false,
               history_write_error: None }
    }

    pub fn failed(cause: impl Into<ExecutionError>, unique_id: impl Into<String>) -> Self {
        Self::new(Outcome::Failed { cause: cause.into() }, unique_id)
    }

    pub fn with_state(mut self, state: AfterPreviousExecutionState) -> Self {
        self.execution_state = Some(state);
        self
    }
}

/// Lo que devuelve cada step: seguir con el contexto enriquecido o cortar la
/// cadena con un resultado final.
#[must_use]
pub enum StepResult<C> {
    Continue(C),
    Finished(ExecutionResult),
}
