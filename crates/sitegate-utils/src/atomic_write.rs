//! Atomic file writes using a temporary file, fsync, and rename.
//!
//! The bypass record is rewritten in place across process restarts; writing
//! through a temp file in the target directory means a reader never observes
//! a partially written record.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// Atomically replace the file at `path` with `content`.
///
/// Creates the parent directory if it does not exist yet.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directory: {parent}"))?;
    }

    // The temp file must live in the target directory so the final rename
    // stays on one filesystem.
    let dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in: {dir}"))?;

    temp.write_all(content.as_bytes())
        .context("failed to write temporary file")?;
    temp.as_file()
        .sync_all()
        .context("failed to fsync temporary file")?;

    temp.persist(path.as_std_path())
        .map_err(|e| anyhow::anyhow!(e.error))
        .with_context(|| format!("failed to persist file: {path}"))?;

    Ok(())
}
