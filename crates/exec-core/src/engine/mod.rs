//! Engine module for the incremental execution pipeline
//!
//! Provides the `ExecutionPipeline` driver that wires the standard steps in
//! their fixed order.

pub mod core;

pub use self::core::ExecutionPipeline;

pub use crate::history::{ExecutionHistoryStore, History, InMemoryHistoryStore};
pub use crate::step::{ExecutionResult, Outcome};
