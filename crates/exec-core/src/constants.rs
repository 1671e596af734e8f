//! Constantes del núcleo de ejecución incremental.
//!
//! Estos valores participan en el cálculo de fingerprints y en la
//! compatibilidad de los registros de historial entre versiones. Cambiar
//! cualquiera de ellos invalida (fuerza re-ejecución) de forma determinista
//! todo el historial previo; nunca produce un match falso.

/// Etiqueta de formato embebida en cada `Fingerprint` (`"v1:<hex>"`).
/// Incrementar ante cualquier cambio incompatible en la codificación.
pub const FINGERPRINT_FORMAT: &str = "v1";

/// Versión del formato de `AfterPreviousExecutionState`. Un registro con
/// otra versión se trata como "sin historial".
pub const HISTORY_FORMAT_VERSION: u32 = 1;

/// Razón usada cuando no existe estado previo utilizable.
pub const NO_HISTORY: &str = "no history";

/// Máximo de razones de cambio reportadas por ejecución.
pub const MAX_CHANGE_REASONS: usize = 3;
