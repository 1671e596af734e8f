//! Mapas de propiedades fingerprinteadas.
//!
//! `BTreeMap` garantiza claves únicas y orden lexicográfico, lo que vuelve
//! determinista cualquier hash calculado sobre ellos.
use std::collections::BTreeMap;

use super::{FileCollectionFingerprint, ValueSnapshot};

/// Nombre de propiedad -> snapshot de su valor.
pub type InputProperties = BTreeMap<String, ValueSnapshot>;

/// Nombre de propiedad -> fingerprint de la colección de archivos de entrada.
pub type InputFileProperties = BTreeMap<String, FileCollectionFingerprint>;

/// Nombre de propiedad -> fingerprint de la colección de archivos de salida.
pub type OutputFileProperties = BTreeMap<String, FileCollectionFingerprint>;
