// src/output/writer.rs
//! Persists byte buffers to disk.

use crate::error::AppError;
use std::fs;
use std::path::Path;

/// Writes `content` to `path`, creating missing parent directories and
/// replacing any existing file. Returns the number of bytes written.
pub fn write_file(path: &Path, content: &[u8]) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| AppError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Wrote file: {}", path.display());
    Ok(content.len())
}
