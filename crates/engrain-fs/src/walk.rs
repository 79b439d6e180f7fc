//! Documentation tree discovery and copy
//!
//! Produces the stable relative file lists the index serializer consumes,
//! and copies fetched docs trees into the project. Hidden entries (leading
//! `.`, which covers `.git` in cloned sources) are skipped throughout.

use std::fs;
use std::path::Path;

use crate::{Error, NormalizedPath, Result};

/// Recursively list all files under `root` as sorted, forward-slash
/// relative paths.
pub fn discover_files(root: &NormalizedPath) -> Result<Vec<String>> {
    let mut files = Vec::new();
    walk_dir(&root.to_native(), "", &mut files)?;
    files.sort();
    tracing::debug!(root = %root, count = files.len(), "discovered files");
    Ok(files)
}

fn walk_dir(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .collect::<std::io::Result<_>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let rel = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if file_type.is_dir() {
            walk_dir(&entry.path(), &rel, out)?;
        } else if file_type.is_file() {
            out.push(rel);
        }
    }
    Ok(())
}

/// Recursively copy `src` into `dest`, skipping hidden entries.
///
/// Returns the number of files copied. `dest` is created if missing.
pub fn copy_tree(src: &NormalizedPath, dest: &NormalizedPath) -> Result<usize> {
    let files = discover_files(src)?;
    for rel in &files {
        let from = src.join(rel).to_native();
        let to = dest.join(rel).to_native();
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::copy(&from, &to).map_err(|e| Error::io(&to, e))?;
    }
    // An empty source still yields an (empty) destination directory.
    fs::create_dir_all(dest.to_native()).map_err(|e| Error::io(dest.to_native(), e))?;
    tracing::debug!(src = %src, dest = %dest, count = files.len(), "copied tree");
    Ok(files.len())
}

/// Sanitize a raw document name to a marker-safe identifier.
///
/// Keeps alphanumerics, `-`, `_`, and `.`; everything else becomes `-`.
/// Block markers embed the name in a quoted attribute, so `"` and `>` must
/// never survive.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
