//! Resolución de identidad de una unidad de trabajo.
//!
//! La identidad es la clave estable con la que se busca el historial. Se
//! deriva sólo de lo que la unidad declara como característico (tipo +
//! características de identidad + mapas de identidad), nunca del contenido
//! de sus entradas completas: esas se comparan aparte, en el step de
//! up-to-date.
use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::constants::FINGERPRINT_FORMAT;
use crate::hashing::hash_value;
use crate::history::History;
use crate::model::{Fingerprint, InputFileProperties, InputProperties};

/// Identidad resuelta de una unidad de trabajo para una ejecución.
#[derive(Debug, Clone)]
pub struct Identity {
    unique_id: String,
    history: Option<History>,
}

impl Identity {
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self { unique_id: unique_id.into(),
               history: None }
    }

    /// Asocia (o quita) el handle de historial.
    pub fn with_history(mut self, history: Option<History>) -> Self {
        self.history = history;
        self
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// `None` cuando la unidad no participa del comportamiento incremental.
    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.unique_id == other.unique_id && self.history.is_some() == other.history.is_some()
    }
}

impl Eq for Identity {}

/// Calcula el id único (hex blake3) de una unidad de trabajo.
///
/// Función pura: mismos argumentos => mismo id, en cualquier proceso. Cambiar
/// cualquiera de ellos cambia el id.
pub fn resolve_unique_id(work_type: &str,
                         characteristics: &Value,
                         input_properties: &InputProperties,
                         input_file_properties: &InputFileProperties)
                         -> String {
    let files: BTreeMap<&String, &Fingerprint> = input_file_properties.iter().map(|(k, v)| (k, v.hash())).collect();
    hash_value(&json!({
        "format": FINGERPRINT_FORMAT,
        "work_type": work_type,
        "identity": characteristics,
        "input_properties": input_properties,
        "input_file_properties": files,
    }))
}
