// Batch coordination: bounded parallel processing of quest files and the
// single-task merge of their tables

use anyhow::{anyhow, Result};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::config::KeygenConfig;
use crate::extraction::Extractor;
use crate::lang::Tables;
use crate::processor::{process_file, FileOutcome};

/// A file whose processing failed; nothing from it was merged
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregate result of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files that were read and rewritten successfully
    pub files_processed: usize,
    /// Subset of `files_processed` whose content actually changed
    pub files_changed: usize,
    pub failures: Vec<FileFailure>,
    /// Union of every successful file's tables
    pub tables: Tables,
    pub total_processing_time_ms: u64,
}

impl BatchReport {
    pub fn unique_keys(&self) -> usize {
        self.tables.len()
    }

    pub fn total_chars(&self) -> usize {
        self.tables.total_chars()
    }

    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: PathBuf, result: Result<FileOutcome>) {
        match result {
            Ok(outcome) => {
                debug!("Processed: {}", outcome.path.display());
                self.files_processed += 1;
                if outcome.changed {
                    self.files_changed += 1;
                }
                self.tables.merge(outcome.tables);
            }
            Err(e) => {
                error!("Failed to process {}: {:#}", path.display(), e);
                self.failures.push(FileFailure {
                    path,
                    error: format!("{e:#}"),
                });
            }
        }
    }
}

/// Process every file in `paths` with at most `config.workers` files in flight.
///
/// Each file runs start to finish on one blocking-pool thread with its own
/// tables. Merging happens here, on the calling task only, in submission order.
/// A failing file does not stop its siblings; it is reported in
/// `BatchReport::failures` and contributes no keys.
pub async fn process_files_parallel(paths: Vec<PathBuf>, config: &KeygenConfig) -> Result<BatchReport> {
    let start_time = Instant::now();
    let workers = config.worker_count();
    info!("Processing {} files with {} workers", paths.len(), workers);

    let extractor = Arc::new(Extractor::new()?);
    let config = Arc::new(config.clone());

    let mut completed: Vec<(usize, PathBuf, Result<FileOutcome>)> = stream::iter(paths.into_iter().enumerate())
        .map(|(index, path)| {
            let extractor = Arc::clone(&extractor);
            let config = Arc::clone(&config);
            async move {
                let task_path = path.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    process_file(&task_path, &extractor, &config)
                })
                .await;
                let result = match joined {
                    Ok(result) => result,
                    Err(join_error) => Err(anyhow!("Worker failed: {}", join_error)),
                };
                (index, path, result)
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    completed.sort_by_key(|(index, _, _)| *index);

    let mut report = BatchReport::default();
    for (_, path, result) in completed {
        report.record(path, result);
    }
    report.total_processing_time_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

    info!(
        "Batch completed in {}ms: {} processed, {} changed, {} failed",
        report.total_processing_time_ms,
        report.files_processed,
        report.files_changed,
        report.files_failed()
    );
    Ok(report)
}
