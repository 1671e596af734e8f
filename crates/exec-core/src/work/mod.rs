//! Unidad de trabajo: la interfaz que el pipeline consume.
//!
//! Una unidad de trabajo declara qué la identifica, qué propiedades y
//! archivos participan del fingerprint y qué archivos produce. El pipeline
//! decide si invocar `execute` o reutilizar el resultado anterior.

mod identity;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{json, Value};

use crate::errors::WorkError;
use crate::history::AfterPreviousExecutionState;
use crate::model::{InputFileProperties, InputProperties};

pub use identity::{resolve_unique_id, Identity};

/// Resultado de invocar una unidad de trabajo con éxito.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutput {
    /// La unidad produjo (o reescribió) sus salidas.
    DidWork,
    /// La unidad corrió pero no tenía nada que hacer.
    DidNoWork,
}

/// Información que recibe la unidad al ser invocada.
#[derive(Debug)]
pub struct WorkRequest<'a> {
    /// Razones por las que se ejecuta (nunca vacío).
    pub reasons: &'a [String],
    /// Último estado registrado, si existe y es compatible.
    pub previous_state: Option<&'a AfterPreviousExecutionState>,
}

pub trait UnitOfWork: Send + Sync {
    /// Tipo de trabajo (p.ej. `"compile"`). Entra en la identidad.
    fn work_type(&self) -> &str;

    /// Nombre amigable para logs (por defecto el tipo).
    fn display_name(&self) -> &str {
        self.work_type()
    }

    /// Características propias que distinguen esta unidad de otras del mismo
    /// tipo (p.ej. la ruta de la tarea). Deben ser estables entre procesos y
    /// distintas para unidades distintas: son la clave del historial.
    fn identity_characteristics(&self) -> Value;

    /// Identidad a partir de los mapas de identidad recibidos. El pipeline
    /// siempre los pasa vacíos al resolver la clave de historial.
    fn identify(&self, input_properties: &InputProperties, input_file_properties: &InputFileProperties) -> Identity {
        Identity::new(resolve_unique_id(self.work_type(),
                                        &self.identity_characteristics(),
                                        input_properties,
                                        input_file_properties))
    }

    /// Descripción de la implementación. Un cambio invalida el historial.
    fn implementation(&self) -> Value {
        json!({ "work_type": self.work_type() })
    }

    /// `false` desactiva todo comportamiento incremental para esta unidad.
    fn tracks_history(&self) -> bool {
        true
    }

    /// Propiedades de entrada fingerprinteadas.
    fn input_properties(&self) -> BTreeMap<String, Value> {
        BTreeMap::new()
    }

    /// Colecciones de archivos de entrada fingerprinteadas.
    fn input_files(&self) -> BTreeMap<String, Vec<PathBuf>> {
        BTreeMap::new()
    }

    /// Colecciones de archivos de salida.
    fn output_files(&self) -> BTreeMap<String, Vec<PathBuf>> {
        BTreeMap::new()
    }

    /// Si es `true`, las salidas parciales de una ejecución fallida se
    /// registran en el historial (marcadas como no exitosas).
    fn partial_results_cacheable(&self) -> bool {
        false
    }

    fn execute(&self, request: &WorkRequest<'_>) -> Result<WorkOutput, WorkError>;
}
