use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::rti_pipeline::common::error::Result;

/// Runs `write` against a temporary file next to `path` and renames it into
/// place only if `write` succeeded. On failure the temporary file is removed
/// and `path` is left untouched.
pub fn write_atomically<T>(path: &Path, write: impl FnOnce(&mut dyn Write) -> Result<T>) -> Result<T> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    debug!(temp = %temp.path().display(), "Writing to temporary file");

    let value = {
        let mut sink = BufWriter::new(temp.as_file_mut());
        let value = write(&mut sink)?;
        sink.flush()?;
        value
    };
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| e.error)?;
    Ok(value)
}
