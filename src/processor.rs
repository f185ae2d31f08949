// Single-file processing: read, extract, rewrite in place

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::KeygenConfig;
use crate::extraction::Extractor;
use crate::keygen::KeyGenerator;
use crate::lang::Tables;

/// Result of processing one quest file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Keys generated from this file only
    pub tables: Tables,
    /// Whether the rewritten content differs from what was read
    pub changed: bool,
    pub processing_time_ms: u64,
}

/// Extract all titles and descriptions from the file at `path` and rewrite it
/// with reference tokens in their place.
///
/// Read, decode and write failures are returned with the path attached; the
/// file is either fully rewritten or left exactly as it was.
pub fn process_file(path: &Path, extractor: &Extractor, config: &KeygenConfig) -> Result<FileOutcome> {
    let start_time = Instant::now();
    info!("{}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut keygen = KeyGenerator::new(config.namespace.as_str());
    let rewritten = extractor.apply(&content, &mut keygen);

    let changed = rewritten != content;
    if changed {
        write_atomic(path, rewritten.as_bytes())
            .with_context(|| format!("Failed to rewrite {}", path.display()))?;
    }

    let tables = keygen.into_tables();
    let processing_time_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!(
        "Extracted {} keys from {} in {}ms (changed: {})",
        tables.len(),
        path.display(),
        processing_time_ms,
        changed
    );

    Ok(FileOutcome {
        path: path.to_path_buf(),
        tables,
        changed,
        processing_time_ms,
    })
}

/// Replace the contents of `path` with `bytes` without ever exposing a
/// partially written file.
///
/// The data goes to a temporary file in the same directory, is flushed to disk,
/// and is then renamed over `path`. An existing file keeps its permissions.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;

    match std::fs::metadata(path) {
        Ok(metadata) => temp.as_file().set_permissions(metadata.permissions())?,
        Err(_) => set_default_permissions(temp.as_file())?,
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move temporary file onto {}", path.display()))?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}
