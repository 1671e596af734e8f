//! Estados de ejecución: lo que se observa antes de ejecutar y lo que queda
//! registrado después.
//!
//! Rol en el pipeline:
//! - `BeforeExecutionState` lo calcula el step de fingerprint con los
//!   valores actuales; es el material de comparación.
//! - `AfterPreviousExecutionState` es el registro persistido de la última
//!   ejecución. Nunca se muta: la siguiente ejecución escribe uno nuevo que lo
//!   reemplaza completo.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::HISTORY_FORMAT_VERSION;
use crate::model::{InputFileProperties, InputProperties, OutputFileProperties, ValueSnapshot};

/// Fingerprints actuales de una unidad de trabajo, previos a ejecutarla.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeforeExecutionState {
    pub implementation: ValueSnapshot,
    pub input_properties: InputProperties,
    pub input_file_properties: InputFileProperties,
    /// Salidas tal como están en disco antes de ejecutar.
    pub output_files: OutputFileProperties,
}

/// Metadatos de la ejecución que produjo las salidas. No participa en la
/// detección de cambios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginMetadata {
    pub execution_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub execution_time_ms: u64,
}

impl OriginMetadata {
    pub fn new(execution_time_ms: u64) -> Self {
        Self { execution_id: Uuid::new_v4(),
               recorded_at: Utc::now(),
               execution_time_ms }
    }
}

/// Registro persistido de la última ejecución de una identidad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterPreviousExecutionState {
    /// Debe coincidir con `HISTORY_FORMAT_VERSION` para ser reutilizable.
    pub format_version: u32,
    pub implementation: ValueSnapshot,
    pub input_properties: InputProperties,
    pub input_file_properties: InputFileProperties,
    pub output_files: OutputFileProperties,
    /// `false` sólo para resultados parciales de una ejecución fallida que la
    /// unidad de trabajo declaró cacheables. Nunca habilita un up-to-date.
    pub successful: bool,
    pub origin: OriginMetadata,
}

impl AfterPreviousExecutionState {
    pub fn new(before: &BeforeExecutionState, output_files: OutputFileProperties, successful: bool, origin: OriginMetadata) -> Self {
        Self { format_version: HISTORY_FORMAT_VERSION,
               implementation: before.implementation.clone(),
               input_properties: before.input_properties.clone(),
               input_file_properties: before.input_file_properties.clone(),
               output_files,
               successful,
               origin }
    }
}
