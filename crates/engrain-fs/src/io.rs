//! Atomic I/O operations
//!
//! All document and lock-file writes go through [`write_atomic`]:
//! write-to-temp-then-rename in the target's own directory, under an
//! exclusive advisory lock, so a crash never leaves a truncated file behind.

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write `content` atomically to `path`.
///
/// Creates parent directories as needed. On any failure after the temp file
/// is created, the temp artifact is removed before the error propagates.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native = path.to_native();

    if let Some(parent) = native.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory so the rename stays on one filesystem.
    let temp_name = format!(
        ".{}.{}.tmp",
        native
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native.with_file_name(&temp_name);

    let result = (|| {
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .lock_exclusive()
            .map_err(|_| Error::LockFailed {
                path: native.clone(),
            })?;

        temp_file
            .write_all(content)
            .map_err(|e| Error::io(&temp_path, e))?;
        temp_file
            .sync_all()
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file.unlock().map_err(|_| Error::LockFailed {
            path: native.clone(),
        })?;

        fs::rename(&temp_path, &native).map_err(|e| Error::io(&native, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Write text content atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Read a file as text.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(&native, e))
}

/// Read a file as text, mapping a missing file to `None`.
pub fn read_text_opt(path: &NormalizedPath) -> Result<Option<String>> {
    let native = path.to_native();
    match fs::read_to_string(&native) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native, e)),
    }
}

/// Delete a file. Deleting a missing file is an error.
pub fn delete_file(path: &NormalizedPath) -> Result<()> {
    let native = path.to_native();
    fs::remove_file(&native).map_err(|e| Error::io(&native, e))
}

/// Remove a directory tree. A missing tree is a no-op.
pub fn remove_tree(path: &NormalizedPath) -> Result<()> {
    let native = path.to_native();
    match fs::remove_dir_all(&native) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(&native, e)),
    }
}
