//! Unidad de trabajo de ejemplo: concatena archivos de entrada en uno de
//! salida, precedidos por una cabecera configurable.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use exec_core::{ExecutionPipeline, ExecutionRequestContext, UnitOfWork, WorkError, WorkOutput, WorkRequest};
use log::debug;
use rayon::prelude::*;
use serde_json::{json, Value};

pub struct ConcatWork {
    name: String,
    header: String,
    sources: Vec<PathBuf>,
    target: PathBuf,
}

impl ConcatWork {
    pub fn new(name: impl Into<String>, sources: Vec<PathBuf>, target: PathBuf) -> Self {
        Self { name: name.into(),
               header: String::new(),
               sources,
               target }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}

impl UnitOfWork for ConcatWork {
    fn work_type(&self) -> &str {
        "concat"
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn identity_characteristics(&self) -> Value {
        json!({ "target": self.target.to_string_lossy() })
    }

    fn input_properties(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([("header".to_string(), json!(self.header))])
    }

    fn input_files(&self) -> BTreeMap<String, Vec<PathBuf>> {
        BTreeMap::from([("sources".to_string(), self.sources.clone())])
    }

    fn output_files(&self) -> BTreeMap<String, Vec<PathBuf>> {
        BTreeMap::from([("target".to_string(), vec![self.target.clone()])])
    }

    fn execute(&self, request: &WorkRequest<'_>) -> Result<WorkOutput, WorkError> {
        debug!("{}: running because {}", self.name, request.reasons.join("; "));
        let mut out = self.header.clone();
        for source in &self.sources {
            let content = fs::read_to_string(source).map_err(|e| WorkError::new(format!("{}: {e}", source.display())))?;
            out.push_str(&content);
        }
        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent).map_err(|e| WorkError::new(e.to_string()))?;
        }
        fs::write(&self.target, out).map_err(|e| WorkError::new(e.to_string()))?;
        Ok(WorkOutput::DidWork)
    }
}

/// Corre `works` en paralelo sobre `pipeline` y devuelve cuántas terminaron
/// con `Outcome::Failed`.
pub fn count_failures(pipeline: &ExecutionPipeline, works: &[Arc<dyn UnitOfWork>]) -> usize {
    works.par_iter()
         .map(|work| pipeline.execute(ExecutionRequestContext::new(work.clone())))
         .filter(|result| result.outcome.is_failed())
         .count()
}
