//! Modelos neutrales (Fingerprint, snapshots, mapas de propiedades, cadena de
//! contextos).

pub mod context;
pub mod file_collection;
pub mod fingerprint;
pub mod properties;

pub use context::{BeforeExecutionContext, CapturedContext, ExecutedContext, ExecutionRequestContext, ExecutionStatus,
                  IdentityContext, PreviousExecutionContext, UpToDateContext, UpToDateDecision};
pub use file_collection::FileCollectionFingerprint;
pub use fingerprint::{Fingerprint, ValueSnapshot};
pub use properties::{InputFileProperties, InputProperties, OutputFileProperties};
