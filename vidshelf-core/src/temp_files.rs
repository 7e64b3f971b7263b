//! Temporary file management utilities.
//!
//! Helpers for staging writes next to their final location. They lean on the
//! tempfile crate so an abandoned staging file is removed when dropped, even
//! on error paths.

use crate::error::CoreResult;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder as TempFileBuilder, NamedTempFile};

/// Creates a temporary file with prefix and extension. Auto-deleted when dropped.
pub fn create_temp_file(dir: &Path, prefix: &str, extension: &str) -> CoreResult<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let temp_file = TempFileBuilder::new()
        .prefix(&format!(".{prefix}_"))
        .suffix(&format!(".{extension}"))
        .tempfile_in(dir)?;

    Ok(temp_file)
}

/// Replaces `path` with `contents` through a staged file in the same directory,
/// so readers see either the old or the new contents, never a mix.
pub fn write_atomically(path: &Path, contents: &[u8]) -> CoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = create_temp_file(dir, "staged", "tmp")?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
