//! Versioned JSON lock-file store
//!
//! The lock file records every embedded document by name: where it came
//! from, which commit was fetched, and the checksum of the index that was
//! injected. It is a plain key-value store behind an explicit path, never
//! ambient global state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use engrain_fs::{NormalizedPath, io};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current lock-file schema version.
pub const LOCKFILE_VERSION: u32 = 2;

/// One embedded document's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Source the docs were materialized from (git URL or local directory).
    pub source: String,
    /// Ref the source was resolved at, when fetched from git.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_ref: Option<String>,
    /// Commit the source was fetched at, when fetched from git.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Directory the docs tree was copied into, relative to the project.
    pub docs_dir: String,
    /// Checksum (`sha256:<hex>`) of the injected index, for change detection.
    pub index_checksum: String,
    /// When the source was last materialized.
    pub fetched_at: DateTime<Utc>,
}

/// The whole lock file. Documents are keyed by name in a BTreeMap so the
/// serialized form diffs stably.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lockfile {
    version: u32,
    #[serde(default)]
    documents: BTreeMap<String, DocumentRecord>,
}

impl Lockfile {
    pub fn new() -> Self {
        Self {
            version: LOCKFILE_VERSION,
            documents: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, name: &str) -> Option<&DocumentRecord> {
        self.documents.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, record: DocumentRecord) {
        self.documents.insert(name.into(), record);
    }

    /// Remove a record, reporting whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.documents.remove(name).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    pub fn documents(&self) -> impl Iterator<Item = (&String, &DocumentRecord)> {
        self.documents.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for Lockfile {
    fn default() -> Self {
        Self::new()
    }
}

/// Load/save/clear access to one lock file path.
pub struct LockStore {
    path: NormalizedPath,
}

impl LockStore {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Load the lock file.
    ///
    /// A missing file loads as an empty lock file. A file written by a newer
    /// tool version is discarded with a warning (wipe-on-downgrade); older
    /// versions load as-is and are rewritten at the current version on save.
    /// Corrupt JSON is a hard error, never a silent wipe.
    pub fn load(&self) -> Result<Lockfile> {
        let Some(raw) = io::read_text_opt(&self.path)? else {
            return Ok(Lockfile::new());
        };
        let parsed: Lockfile =
            serde_json::from_str(&raw).map_err(|e| Error::LockfileParse {
                path: self.path.to_string(),
                message: e.to_string(),
            })?;
        if parsed.version > LOCKFILE_VERSION {
            tracing::warn!(
                path = %self.path,
                found = parsed.version,
                supported = LOCKFILE_VERSION,
                "lock file written by a newer engrain; starting fresh"
            );
            return Ok(Lockfile::new());
        }
        Ok(parsed)
    }

    /// Save atomically, always at the current schema version.
    pub fn save(&self, lockfile: &Lockfile) -> Result<()> {
        let mut lockfile = lockfile.clone();
        lockfile.version = LOCKFILE_VERSION;
        let content = serde_json::to_string_pretty(&lockfile)?;
        io::write_text(&self.path, &content)?;
        Ok(())
    }

    /// Delete the lock file entirely. Missing file is a no-op.
    pub fn clear(&self) -> Result<()> {
        if self.path.is_file() {
            io::delete_file(&self.path)?;
        }
        Ok(())
    }
}
