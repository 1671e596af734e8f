//! Cadena de contextos de ejecución.
//!
//! Cada step recibe una vista y produce la siguiente, que embebe literalmente
//! a la anterior más los campos nuevos:
//!
//! ```text
//! ExecutionRequestContext
//!   -> IdentityContext            (+ identity, mapas de identidad vacíos)
//!   -> PreviousExecutionContext   (+ after_previous_execution_state)
//!   -> BeforeExecutionContext     (+ before_execution_state)
//!   -> UpToDateContext            (+ decision)
//!   -> ExecutedContext            (+ execution)
//!   -> CapturedContext            (+ after_execution_state)
//! ```
//!
//! Los campos anteriores se alcanzan vía `Deref`; los posteriores no existen
//! en el tipo, así que un step no puede leer algo que todavía no se calculó.
use std::ops::Deref;
use std::sync::Arc;

use crate::errors::ExecutionError;
use crate::history::{AfterPreviousExecutionState, BeforeExecutionState};
use crate::model::{InputFileProperties, InputProperties};
use crate::work::{Identity, UnitOfWork, WorkOutput};

/// Implementa `Deref` de una vista hacia la vista que embebe (`parent`).
macro_rules! extends {
    ($child:ty => $parent:ty) => {
        impl Deref for $child {
            type Target = $parent;
            fn deref(&self) -> &$parent {
                &self.parent
            }
        }
    };
}

/// Pedido de ejecución: punto de entrada del pipeline.
#[derive(Clone)]
pub struct ExecutionRequestContext {
    work: Arc<dyn UnitOfWork>,
    /// Razón para re-ejecutar sin importar los fingerprints (p.ej. `--rerun`).
    pub rebuild_reason: Option<String>,
}

impl ExecutionRequestContext {
    pub fn new(work: Arc<dyn UnitOfWork>) -> Self {
        Self { work, rebuild_reason: None }
    }

    pub fn with_rebuild_reason(mut self, reason: impl Into<String>) -> Self {
        self.rebuild_reason = Some(reason.into());
        self
    }

    pub fn work(&self) -> &dyn UnitOfWork {
        self.work.as_ref()
    }
}

pub struct IdentityContext {
    parent: ExecutionRequestContext,
    pub identity: Identity,
    /// Mapas con los que se resolvió la identidad (vacíos en el pipeline
    /// estándar). Los valores actuales están en `BeforeExecutionContext`.
    pub input_properties: InputProperties,
    pub input_file_properties: InputFileProperties,
}

impl IdentityContext {
    pub fn new(parent: ExecutionRequestContext,
               identity: Identity,
               input_properties: InputProperties,
               input_file_properties: InputFileProperties)
               -> Self {
        Self { parent,
               identity,
               input_properties,
               input_file_properties }
    }
}

extends!(IdentityContext => ExecutionRequestContext);

pub struct PreviousExecutionContext {
    parent: IdentityContext,
    /// Ausente si no hay historial, no hay registro o no se pudo leer.
    pub after_previous_execution_state: Option<AfterPreviousExecutionState>,
}

impl PreviousExecutionContext {
    pub fn new(parent: IdentityContext, after_previous_execution_state: Option<AfterPreviousExecutionState>) -> Self {
        Self { parent,
               after_previous_execution_state }
    }
}

extends!(PreviousExecutionContext => IdentityContext);

pub struct BeforeExecutionContext {
    parent: PreviousExecutionContext,
    pub before_execution_state: BeforeExecutionState,
}

impl BeforeExecutionContext {
    pub fn new(parent: PreviousExecutionContext, before_execution_state: BeforeExecutionState) -> Self {
        Self { parent,
               before_execution_state }
    }
}

extends!(BeforeExecutionContext => PreviousExecutionContext);

/// Decisión del step de up-to-date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpToDateDecision {
    UpToDate { reason: String },
    /// `reasons` nunca está vacío.
    OutOfDate { reasons: Vec<String> },
}

impl UpToDateDecision {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, UpToDateDecision::UpToDate { .. })
    }

    pub fn reason(&self) -> String {
        match self {
            UpToDateDecision::UpToDate { reason } => reason.clone(),
            UpToDateDecision::OutOfDate { reasons } => reasons.join("; "),
        }
    }
}

pub struct UpToDateContext {
    parent: BeforeExecutionContext,
    pub decision: UpToDateDecision,
}

impl UpToDateContext {
    pub fn new(parent: BeforeExecutionContext, decision: UpToDateDecision) -> Self {
        Self { parent, decision }
    }
}

extends!(UpToDateContext => BeforeExecutionContext);

/// Qué pasó al invocar la unidad de trabajo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Completed { output: WorkOutput, execution_time_ms: u64 },
    /// Falló, pero la unidad declaró sus resultados parciales cacheables.
    FailedWithPartialResults { cause: ExecutionError, execution_time_ms: u64 },
}

impl ExecutionStatus {
    pub fn execution_time_ms(&self) -> u64 {
        match self {
            ExecutionStatus::Completed { execution_time_ms, .. }
            | ExecutionStatus::FailedWithPartialResults { execution_time_ms, .. } => *execution_time_ms,
        }
    }
}

pub struct ExecutedContext {
    parent: UpToDateContext,
    pub execution: ExecutionStatus,
}

impl ExecutedContext {
    pub fn new(parent: UpToDateContext, execution: ExecutionStatus) -> Self {
        Self { parent, execution }
    }
}

extends!(ExecutedContext => UpToDateContext);

pub struct CapturedContext {
    parent: ExecutedContext,
    pub after_execution_state: AfterPreviousExecutionState,
}

impl CapturedContext {
    pub fn new(parent: ExecutedContext, after_execution_state: AfterPreviousExecutionState) -> Self {
        Self { parent,
               after_execution_state }
    }
}

extends!(CapturedContext => ExecutedContext);
