//! Carga de configuración del historial desde variables de entorno.
//! Usa convención `BUILDEXEC_HISTORY_*`; todas tienen valor por defecto.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

pub const DEFAULT_HISTORY_DIR: &str = ".buildexec/history";
pub const DEFAULT_IO_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 15;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Reintentos para errores de IO transitorios. El backoff es lineal:
/// `backoff_ms * intento`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { retries: DEFAULT_IO_RETRIES,
               backoff_ms: DEFAULT_RETRY_BACKOFF_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Directorio raíz de los registros.
    pub dir: PathBuf,
    pub retry: RetryPolicy,
}

impl HistoryConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de una función arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let dir = lookup("BUILDEXEC_HISTORY_DIR").filter(|v| !v.trim().is_empty())
                                                 .unwrap_or_else(|| DEFAULT_HISTORY_DIR.to_string());
        let retries = lookup("BUILDEXEC_HISTORY_IO_RETRIES").and_then(|v| v.parse().ok())
                                                            .unwrap_or(DEFAULT_IO_RETRIES);
        let backoff_ms = lookup("BUILDEXEC_HISTORY_RETRY_BACKOFF_MS").and_then(|v| v.parse().ok())
                                                                     .unwrap_or(DEFAULT_RETRY_BACKOFF_MS);
        Self { dir: PathBuf::from(dir),
               retry: RetryPolicy { retries, backoff_ms } }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |k| vars.get(k).map(|v| v.to_string())
    }

    #[test]
    fn defaults_apply_when_unset_or_invalid() {
        let cfg = HistoryConfig::from_lookup(lookup_in(HashMap::from([("BUILDEXEC_HISTORY_IO_RETRIES", "many"),
                                                                      ("BUILDEXEC_HISTORY_DIR", "  ")])));
        assert_eq!(cfg.dir, PathBuf::from(DEFAULT_HISTORY_DIR));
        assert_eq!(cfg.retry, RetryPolicy::default());
    }

    #[test]
    fn values_are_read_from_lookup() {
        let cfg = HistoryConfig::from_lookup(lookup_in(HashMap::from([("BUILDEXEC_HISTORY_DIR", "/tmp/h"),
                                                                      ("BUILDEXEC_HISTORY_IO_RETRIES", "5"),
                                                                      ("BUILDEXEC_HISTORY_RETRY_BACKOFF_MS", "1")])));
        assert_eq!(cfg.dir, PathBuf::from("/tmp/h"));
        assert_eq!(cfg.retry, RetryPolicy { retries: 5, backoff_ms: 1 });
    }
}
