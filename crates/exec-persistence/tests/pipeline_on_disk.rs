
use std::fs;
use std::sync::Arc;

use exec_core::{ExecutionHistoryStore, ExecutionPipeline, History, Outcome};
use tempfile::tempdir;
use test_support::{file_store, CopyWork};

#[test]
fn second_run_is_up_to_date_across_store_instances() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("in.txt");
    let target = tmp.path().join("out.txt");
    let root = tmp.path().join("history");
    fs::write(&source, "hello").unwrap();
    let work = CopyWork::new("copy", source, target.clone());

    let first = ExecutionPipeline::with_history(History::new(file_store(&root))).run(work.clone());
    assert!(matches!(first.outcome, Outcome::Executed { .. }));
    assert!(first.history_stored);
    assert_eq!(fs::read_to_string(&target).unwrap(), "copy:hello");

    // Un pipeline nuevo sobre el mismo directorio ve el registro persistido.
    let second = ExecutionPipeline::with_history(History::new(file_store(&root))).run(work.clone());
    assert!(second.outcome.is_up_to_date(), "{}", second.outcome);
    assert_eq!(work.runs(), 1);
    assert_eq!(second.unique_id, first.unique_id);
}

#[test]
fn changed_input_file_reruns_and_replaces_record() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("in.txt");
    let target = tmp.path().join("out.txt");
    let store = Arc::new(file_store(&tmp.path().join("history")));
    let pipeline = ExecutionPipeline::with_history(History::from_arc(store.clone()));
    fs::write(&source, "one").unwrap();
    let work = CopyWork::new("copy", source.clone(), target.clone());

    let first = pipeline.run(work.clone());
    fs::write(&source, "two").unwrap();
    let second = pipeline.run(work.clone());

    assert_eq!(second.outcome,
               Outcome::Executed { reason: "input file property 'source' has changed".to_string() });
    assert_eq!(work.runs(), 2);
    let stored = store.load(&second.unique_id).unwrap().unwrap();
    assert_eq!(Some(stored.clone()), second.execution_state);
    assert_ne!(first.execution_state, Some(stored));
}

#[test]
fn corrupt_record_forces_full_execution() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("in.txt");
    let store = Arc::new(file_store(&tmp.path().join("history")));
    let pipeline = ExecutionPipeline::with_history(History::from_arc(store.clone()));
    fs::write(&source, "x").unwrap();
    let work = CopyWork::new("copy", source, tmp.path().join("out.txt"));

    let first = pipeline.run(work.clone());
    fs::write(store.record_path(&first.unique_id), "not json").unwrap();
    let second = pipeline.run(work.clone());

    assert_eq!(second.outcome, Outcome::Executed { reason: "no history".to_string() });
    assert_eq!(work.runs(), 2);
    // La corrida reescribe un registro válido.
    assert!(store.load(&second.unique_id).unwrap().is_some());
}
