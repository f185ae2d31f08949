use anyhow::{bail, Context, Result};
use ignore::{WalkBuilder, WalkState};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_EXTENSION;

/// Configuration for file discovery behavior
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// File extension to match, without the leading dot
    pub extension: String,
    /// Threads used by the directory walker
    pub threads: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            threads: (num_cpus::get() / 2).max(1),
        }
    }
}

/// Check that `root_dir` exists and is a directory before anything is touched
pub fn validate_root(root_dir: &Path) -> Result<()> {
    if !root_dir.exists() {
        bail!("{} does not exist", root_dir.display());
    }
    if !root_dir.is_dir() {
        bail!("{} is not a valid directory", root_dir.display());
    }
    Ok(())
}

/// Files found by a walk, plus the entries the walk could not read
#[derive(Debug, Default, Clone)]
pub struct DiscoveredFiles {
    /// Matching files, sorted by path
    pub files: Vec<PathBuf>,
    /// One message per unreadable entry; anything below it was not searched
    pub walk_errors: Vec<String>,
}

impl DiscoveredFiles {
    pub fn is_complete(&self) -> bool {
        self.walk_errors.is_empty()
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Walk `root_dir` recursively and return every regular file with the
/// configured extension, sorted by path.
///
/// Hidden entries are included, ignore files are not honored and symlinks are
/// not followed. Unreadable entries are logged and collected in
/// `DiscoveredFiles::walk_errors` so the caller can fail the run.
pub fn discover_files(root_dir: &Path, config: &DiscoveryConfig) -> Result<DiscoveredFiles> {
    validate_root(root_dir)?;
    info!("Starting directory traversal in: {}", root_dir.display());
    let traversal_start = std::time::Instant::now();

    let walker = WalkBuilder::new(root_dir)
        .threads(config.threads.max(1))
        .follow_links(false)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .build_parallel();

    let (result_tx, result_rx) = std::sync::mpsc::channel();
    walker.run(|| {
        let result_tx = result_tx.clone();
        let extension = config.extension.clone();
        Box::new(move |result| {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file())
                        && has_extension(entry.path(), &extension)
                    {
                        debug!("Found matching file: {}", entry.path().display());
                        if result_tx.send(Ok(entry.into_path())).is_err() {
                            return WalkState::Quit;
                        }
                    }
                }
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    if result_tx.send(Err(e.to_string())).is_err() {
                        return WalkState::Quit;
                    }
                }
            }
            WalkState::Continue
        })
    });
    drop(result_tx);

    let mut discovered = DiscoveredFiles::default();
    for result in result_rx {
        match result {
            Ok(path) => discovered.files.push(path),
            Err(message) => discovered.walk_errors.push(message),
        }
    }
    discovered.files.sort();
    discovered.walk_errors.sort();

    info!(
        "Discovery completed in {}ms, found {} files, {} unreadable entries",
        traversal_start.elapsed().as_millis(),
        discovered.files.len(),
        discovered.walk_errors.len()
    );
    Ok(discovered)
}

/// Async wrapper that runs the walk on the blocking pool
pub async fn discover_files_async(root_dir: impl AsRef<Path>, config: DiscoveryConfig) -> Result<DiscoveredFiles> {
    let root_dir = root_dir.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || discover_files(&root_dir, &config))
        .await
        .context("Discovery task panicked")?
}
