use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use buildexec::demo::{count_failures, ConcatWork};
use exec_core::{ExecutionPipeline, ExecutionRequestContext, History, UnitOfWork};
use exec_persistence::{FileHistoryStore, HistoryConfig};
use log::{error, info};

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Tres unidades independientes sobre `workdir`.
fn works(workdir: &Path) -> Vec<Arc<dyn UnitOfWork>> {
    (1..=3).map(|i| {
               let work = ConcatWork::new(format!("concat-{i}"),
                                          vec![workdir.join("a.txt"), workdir.join(format!("part-{i}.txt"))],
                                          workdir.join("out").join(format!("joined-{i}.txt")));
               Arc::new(work.with_header(format!("# joined {i}\n"))) as Arc<dyn UnitOfWork>
           })
           .collect()
}

fn run_all(pipeline: &ExecutionPipeline, works: &[Arc<dyn UnitOfWork>], label: &str) -> usize {
    info!("--- {label} ---");
    count_failures(pipeline, works)
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let config = HistoryConfig::from_env();
    let workdir = config.dir.parent().unwrap_or_else(|| Path::new(".")).join("demo");
    fs::create_dir_all(&workdir)?;
    fs::write(workdir.join("a.txt"), "shared\n")?;
    for i in 1..=3 {
        fs::write(workdir.join(format!("part-{i}.txt")), format!("part {i}\n"))?;
    }
    info!("history in {}, demo files in {}", config.dir.display(), workdir.display());

    let pipeline = ExecutionPipeline::with_history(History::new(FileHistoryStore::from_config(&config)));
    let works = works(&workdir);

    let mut failed = run_all(&pipeline, &works, "first run");
    failed += run_all(&pipeline, &works, "second run (nothing changed)");

    fs::write(workdir.join("part-2.txt"), "part 2, edited\n")?;
    failed += run_all(&pipeline, &works, "third run (part-2 edited)");

    let forced = ExecutionRequestContext::new(works[0].clone()).with_rebuild_reason("forced by demo");
    let result = pipeline.execute(forced);
    info!("forced rebuild of {}: history stored = {}", result.unique_id, result.history_stored);
    if result.outcome.is_failed() {
        failed += 1;
    }

    if failed > 0 {
        error!("{failed} unit(s) of work failed");
        return Err(format!("{failed} unit(s) of work failed").into());
    }
    Ok(())
}
