//! Unidades de trabajo y stores de prueba compartidos por los tests de
//! integración.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use exec_core::history::{AfterPreviousExecutionState, ExecutionHistoryStore, History, InMemoryHistoryStore};
use exec_core::{HistoryError, UnitOfWork, WorkError, WorkOutput, WorkRequest};
use serde_json::{json, Value};

/// Escribe `<version>:<contenido de source>` en `output`.
pub struct FileWork {
    pub path: String,
    pub version: Mutex<String>,
    pub source: Option<PathBuf>,
    pub output: PathBuf,
    pub history: bool,
    pub fail: AtomicBool,
    pub partial_results_cacheable: bool,
    pub runs: AtomicUsize,
}

impl FileWork {
    pub fn new(path: &str, output: PathBuf) -> Self {
        Self { path: path.to_string(),
               version: Mutex::new("1.0".to_string()),
               source: None,
               output,
               history: true,
               fail: AtomicBool::new(false),
               partial_results_cacheable: false,
               runs: AtomicUsize::new(0) }
    }

    pub fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    pub fn without_history(mut self) -> Self {
        self.history = false;
        self
    }

    pub fn with_cacheable_failures(mut self) -> Self {
        self.partial_results_cacheable = true;
        self
    }

    pub fn set_version(&self, version: &str) {
        *self.version.lock().unwrap() = version.to_string();
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl UnitOfWork for FileWork {
    fn work_type(&self) -> &str {
        "file-work"
    }

    fn display_name(&self) -> &str {
        &self.path
    }

    fn identity_characteristics(&self) -> Value {
        json!({ "path": self.path })
    }

    fn tracks_history(&self) -> bool {
        self.history
    }

    fn input_properties(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([("version".to_string(), json!(*self.version.lock().unwrap()))])
    }

    fn input_files(&self) -> BTreeMap<String, Vec<PathBuf>> {
        self.source.iter().map(|s| ("source".to_string(), vec![s.clone()])).collect()
    }

    fn output_files(&self) -> BTreeMap<String, Vec<PathBuf>> {
        BTreeMap::from([("output".to_string(), vec![self.output.clone()])])
    }

    fn partial_results_cacheable(&self) -> bool {
        self.partial_results_cacheable
    }

    fn execute(&self, _request: &WorkRequest<'_>) -> Result<WorkOutput, WorkError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            fs::write(&self.output, "partial").map_err(|e| WorkError::new(e.to_string()))?;
            return Err(WorkError::new("boom"));
        }
        let content = match &self.source {
            Some(source) => fs::read_to_string(source).map_err(|e| WorkError::new(e.to_string()))?,
            None => String::new(),
        };
        let version = self.version.lock().unwrap().clone();
        fs::write(&self.output, format!("{version}:{content}")).map_err(|e| WorkError::new(e.to_string()))?;
        Ok(WorkOutput::DidWork)
    }
}

/// Store en memoria que cuenta escrituras y puede simular fallos.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: InMemoryHistoryStore,
    pub stores: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn stores(&self) -> usize {
        self.stores.load(Ordering::SeqCst)
    }
}

impl ExecutionHistoryStore for RecordingStore {
    fn load(&self, unique_id: &str) -> Result<Option<AfterPreviousExecutionState>, HistoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(HistoryError::Unavailable("simulated read failure".into()));
        }
        self.inner.load(unique_id)
    }

    fn store(&self, unique_id: &str, state: &AfterPreviousExecutionState) -> Result<(), HistoryError> {
        self.stores.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(HistoryError::Unavailable("simulated write failure".into()));
        }
        self.inner.store(unique_id, state)
    }

    fn remove(&self, unique_id: &str) -> Result<(), HistoryError> {
        self.inner.remove(unique_id)
    }
}

pub fn history_of(store: &Arc<RecordingStore>) -> History {
    History::from_arc(store.clone())
}
