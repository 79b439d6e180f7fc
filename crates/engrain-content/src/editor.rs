//! File-level document editing
//!
//! The editor owns no document state: every operation re-reads the file in
//! full, applies a pure mutation from [`crate::inject`], and persists the
//! result with an atomic write. A missing file reads as an empty document.

use engrain_fs::{NormalizedPath, io};

use crate::error::{Error, Result};
use crate::inject::{self, InjectOutcome};
use crate::marker;

/// Editor for one target document path.
pub struct DocumentEditor {
    path: NormalizedPath,
}

impl DocumentEditor {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Inject a block with the given body.
    ///
    /// Returns whether an existing block was replaced. Fails with
    /// [`Error::MissingWrapper`] when the document has unrelated content and
    /// no wrapper, and with [`Error::AlreadyExists`] when the block is
    /// present and `force` is unset.
    pub fn inject_block(&self, name: &str, body: &str, force: bool) -> Result<bool> {
        let source = io::read_text_opt(&self.path)?.unwrap_or_default();
        match inject::inject_block(&source, name, body, force) {
            InjectOutcome::Updated { source, existed } => {
                io::write_text(&self.path, &source)?;
                Ok(existed)
            }
            InjectOutcome::NoWrapper => Err(Error::MissingWrapper {
                path: self.path.to_string(),
            }),
            InjectOutcome::Conflict => Err(Error::AlreadyExists {
                name: name.to_string(),
                path: self.path.to_string(),
            }),
        }
    }

    /// Remove a block. Returns whether it existed; an absent block (or an
    /// absent file) performs no write at all.
    pub fn remove_block(&self, name: &str) -> Result<bool> {
        let Some(source) = io::read_text_opt(&self.path)? else {
            return Ok(false);
        };
        match inject::remove_block(&source, name) {
            Some(updated) => {
                io::write_text(&self.path, &updated)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the wrapper region and everything inside it.
    ///
    /// When nothing but the wrapper was in the file, the file itself is
    /// deleted; otherwise the remaining content is written back with a
    /// single trailing newline. Returns whether a wrapper existed.
    pub fn remove_wrapper(&self) -> Result<bool> {
        let Some(source) = io::read_text_opt(&self.path)? else {
            return Ok(false);
        };
        match inject::remove_wrapper(&source) {
            Some(stripped) => {
                if stripped.trim().is_empty() {
                    io::delete_file(&self.path)?;
                } else {
                    let content = format!("{}\n", stripped.trim_end());
                    io::write_text(&self.path, &content)?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Names of all blocks currently in the document, in document order.
    pub fn block_names(&self) -> Result<Vec<String>> {
        let source = io::read_text_opt(&self.path)?.unwrap_or_default();
        Ok(marker::find_blocks(&source)
            .into_iter()
            .map(|b| b.name)
            .collect())
    }
}
