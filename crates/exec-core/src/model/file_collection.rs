//! Fingerprint de colecciones de archivos.
//!
//! Resumen inmutable y normalizado de un conjunto de archivos: cada ruta se
//! asocia al hash de su contenido y todas las entradas (ordenadas por ruta)
//! se agregan en un único `Fingerprint`. El orden de iteración del sistema de
//! archivos nunca influye en el resultado.
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use super::Fingerprint;
use crate::errors::SnapshotError;

const MISSING: &str = "missing";
const DIRECTORY: &str = "directory";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCollectionFingerprint {
    hash: Fingerprint,
    files: BTreeMap<String, Fingerprint>,
}

// La igualdad es la del agregado: una sola comparación de strings.
impl PartialEq for FileCollectionFingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for FileCollectionFingerprint {}

impl FileCollectionFingerprint {
    pub fn empty() -> Self {
        Self::from_entries(std::iter::empty())
    }

    /// Construye el fingerprint a partir de entradas `ruta -> hash` ya
    /// calculadas (el orden de entrada es irrelevante).
    pub fn from_entries<I>(entries: I) -> Self
        where I: IntoIterator<Item = (String, Fingerprint)>
    {
        let files: BTreeMap<String, Fingerprint> = entries.into_iter().collect();
        let mut h = Hasher::new();
        for (path, fp) in &files {
            h.update(path.as_bytes());
            h.update(&[0]);
            h.update(fp.as_str().as_bytes());
            h.update(b"\n");
        }
        Self { hash: Fingerprint::from_hex(h.finalize().to_hex().to_string()),
               files }
    }

    /// Lee el sistema de archivos y calcula el fingerprint de `roots`.
    ///
    /// - Rutas inexistentes se registran con un marcador estable (`missing`).
    /// - Directorios se recorren recursivamente.
    /// - Un archivo ilegible es un error.
    pub fn snapshot<P: AsRef<Path>>(roots: &[P]) -> Result<Self, SnapshotError> {
        let mut entries = BTreeMap::new();
        for root in roots {
            visit(root.as_ref(), &mut entries)?;
        }
        Ok(Self::from_entries(entries))
    }

    pub fn hash(&self) -> &Fingerprint {
        &self.hash
    }

    pub fn files(&self) -> &BTreeMap<String, Fingerprint> {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

// Clave exacta de la ruta. Sin conversión con pérdida: dos rutas distintas
// nunca comparten entrada.
fn key_of(path: &Path) -> Result<String, SnapshotError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| SnapshotError::NonUtf8Path(path.to_string_lossy().into_owned()))
}

fn visit(path: &Path, entries: &mut BTreeMap<String, Fingerprint>) -> Result<(), SnapshotError> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            entries.insert(key_of(path)?, Fingerprint::from_hex(MISSING));
            return Ok(());
        }
        Err(e) => return Err(SnapshotError::io(path, &e)),
    };
    if meta.is_dir() {
        entries.insert(key_of(path)?, Fingerprint::from_hex(DIRECTORY));
        let children = fs::read_dir(path).map_err(|e| SnapshotError::io(path, &e))?;
        for child in children {
            let child = child.map_err(|e| SnapshotError::io(path, &e))?;
            visit(&child.path(), entries)?;
        }
    } else {
        entries.insert(key_of(path)?, hash_file(path)?);
    }
    Ok(())
}

fn hash_file(path: &Path) -> Result<Fingerprint, SnapshotError> {
    let mut file = fs::File::open(path).map_err(|e| SnapshotError::io(path, &e))?;
    let mut h = Hasher::new();
    io::copy(&mut file, &mut h).map_err(|e| SnapshotError::io(path, &e))?;
    Ok(Fingerprint::from_hex(h.finalize().to_hex().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_is_independent_of_entry_order() {
        let a = Fingerprint::of_str("a");
        let b = Fingerprint::of_str("b");
        let x = FileCollectionFingerprint::from_entries(vec![("x/a".into(), a.clone()), ("x/b".into(), b.clone())]);
        let y = FileCollectionFingerprint::from_entries(vec![("x/b".into(), b), ("x/a".into(), a)]);
        assert_eq!(x, y);
        assert_eq!(x.hash(), y.hash());
    }

    #[test]
    fn snapshot_tracks_content_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("input.txt");
        let missing = FileCollectionFingerprint::snapshot(&[&file]).unwrap();
        assert_eq!(missing.files().len(), 1);

        fs::write(&file, "one").unwrap();
        let one = FileCollectionFingerprint::snapshot(&[&file]).unwrap();
        assert_ne!(missing, one);

        fs::write(&file, "two").unwrap();
        let two = FileCollectionFingerprint::snapshot(&[&file]).unwrap();
        assert_ne!(one, two);

        fs::write(&file, "one").unwrap();
        assert_eq!(one, FileCollectionFingerprint::snapshot(&[&file]).unwrap());
    }

    #[test]
    fn snapshot_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        let fp = FileCollectionFingerprint::snapshot(&[dir.path()]).unwrap();
        // raíz + nested + dos archivos
        assert_eq!(fp.files().len(), 4);
        assert!(!fp.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn backslash_names_do_not_collide_with_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a").join("b"), "nested").unwrap();
        fs::write(dir.path().join("a\\b"), "flat").unwrap();

        let before = FileCollectionFingerprint::snapshot(&[dir.path()]).unwrap();
        // raíz + a + a/b + "a\\b"
        assert_eq!(before.files().len(), 4);

        fs::write(dir.path().join("a\\b"), "flat, edited").unwrap();
        assert_ne!(before, FileCollectionFingerprint::snapshot(&[dir.path()]).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_are_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"bad-\xff"));
        let err = FileCollectionFingerprint::snapshot(&[&path]).unwrap_err();
        assert!(matches!(err, SnapshotError::NonUtf8Path(_)));
    }
}
