//! `Fingerprint` y `ValueSnapshot`.
//!
//! Un `Fingerprint` es un string `"<formato>:<hex blake3>"`. La etiqueta de
//! formato viaja dentro del valor: si la codificación cambia de forma
//! incompatible, los fingerprints viejos simplemente dejan de ser iguales a
//! los nuevos (miss forzado, nunca un match falso). Comparar dos fingerprints
//! es comparar dos strings.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::FINGERPRINT_FORMAT;
use crate::errors::SnapshotError;
use crate::hashing::{hash_str, hash_value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Envuelve un hash hex ya calculado con la etiqueta de formato actual.
    pub fn from_hex(hex: impl AsRef<str>) -> Self {
        Self(format!("{}:{}", FINGERPRINT_FORMAT, hex.as_ref()))
    }

    /// Fingerprint de un string arbitrario.
    pub fn of_str(input: &str) -> Self {
        Self::from_hex(hash_str(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Etiqueta de formato (`"v1"`, ...). `None` si el valor no la trae.
    pub fn format(&self) -> Option<&str> {
        self.0.split_once(':').map(|(tag, _)| tag)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot inmutable de un valor escalar/estructurado de entrada.
///
/// Dos snapshots son iguales si y sólo si el valor sería idéntico a efectos
/// de caché: se hashea el JSON canónico, así que el orden de claves no cuenta.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSnapshot {
    fingerprint: Fingerprint,
}

impl ValueSnapshot {
    pub fn of<T: Serialize + ?Sized>(value: &T) -> Result<Self, SnapshotError> {
        let json = serde_json::to_value(value).map_err(|e| SnapshotError::Serialize(e.to_string()))?;
        Ok(Self::from_json(&json))
    }

    pub fn from_json(value: &Value) -> Self {
        Self { fingerprint: Fingerprint::from_hex(hash_value(value)) }
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}
