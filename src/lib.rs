//! buildexec: fachada sobre `exec-core` y `exec-persistence`.
//!
//! Re-exporta ambos crates y agrega `demo`, una unidad de trabajo de ejemplo
//! que usa el binario `buildexec-demo`.

pub mod demo;

pub use exec_core;
pub use exec_persistence;
