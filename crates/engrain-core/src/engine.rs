//! The orchestration engine
//!
//! Every public operation re-reads the lock file and the target document,
//! computes the new state, and persists it before returning; nothing is
//! cached between calls. The engine assumes a single writer per project
//! (callers run operations sequentially).

use chrono::Utc;
use sha2::{Digest, Sha256};

use engrain_content::DocumentEditor;
use engrain_fs::{NormalizedPath, copy_tree, discover_files, io, sanitize_name};
use engrain_git::{FetchedRepo, fetch_source};
use engrain_index::{serialize, validate};

use crate::error::{Error, Result};
use crate::lockfile::{DocumentRecord, LockStore, Lockfile};

/// Result of adding or updating one document.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub name: String,
    /// Commit the source was fetched at; `None` for local directory sources.
    pub commit: Option<String>,
    /// Number of files recorded in the index.
    pub file_count: usize,
    /// Whether an existing block was replaced rather than freshly inserted.
    pub replaced: bool,
    /// Whether the index differs from what the lock file last recorded.
    pub changed: bool,
    /// Advisory warnings from the index validator.
    pub warnings: Vec<String>,
}

/// Result of checking one recorded document.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub name: String,
    /// Advisory warnings from re-validating the regenerated index.
    pub warnings: Vec<String>,
    /// The docs tree no longer serializes to the recorded checksum.
    pub drifted: bool,
    /// The block is missing from the target document.
    pub block_missing: bool,
}

/// Orchestrates fetch, discovery, serialization, injection, and the lock
/// file for one project.
pub struct Engine {
    target: NormalizedPath,
    docs_root: NormalizedPath,
    /// Operator-facing docs root string, rendered verbatim into the index
    /// `root:` token.
    docs_root_label: String,
    cache_dir: NormalizedPath,
    store: LockStore,
}

impl Engine {
    /// Build an engine for a project root.
    ///
    /// `target_file` and `docs_root` are interpreted relative to the root;
    /// `docs_root` is also used verbatim as the index root label.
    pub fn new(
        project_root: NormalizedPath,
        target_file: &str,
        docs_root: &str,
        cache_dir: NormalizedPath,
    ) -> Self {
        let store = LockStore::new(project_root.join(".engrain").join("engrain-lock.json"));
        Self {
            target: project_root.join(target_file),
            docs_root: project_root.join(docs_root),
            docs_root_label: docs_root.to_string(),
            cache_dir,
            store,
        }
    }

    /// Path of the target document.
    pub fn target(&self) -> &NormalizedPath {
        &self.target
    }

    /// Embed a documentation source.
    ///
    /// Materializes the docs tree, serializes and validates the index,
    /// injects it into the target document, and records the result. With
    /// `force`, an existing block of the same name is replaced.
    pub fn add(
        &self,
        source: &str,
        name: Option<&str>,
        reference: Option<&str>,
        force: bool,
    ) -> Result<AddOutcome> {
        let name = match name {
            Some(n) => sanitize_name(n),
            None => derive_name(source),
        };
        tracing::debug!(%name, source, "embedding documentation source");

        let fetched = self.materialize(source, &name, reference)?;
        let docs_dir = self.docs_root.join(&name);
        let files = discover_files(&docs_dir)?;

        let index = serialize(&files, &name, &self.docs_root_label);
        let warnings = validate(&index);
        for warning in &warnings {
            tracing::warn!(%name, "{warning}");
        }

        let checksum = index_checksum(&index);
        let mut lockfile = self.store.load()?;
        let changed = lockfile
            .get(&name)
            .is_none_or(|record| record.index_checksum != checksum);

        let editor = DocumentEditor::new(self.target.clone());
        let replaced = editor.inject_block(&name, &index, force)?;

        lockfile.insert(
            name.clone(),
            DocumentRecord {
                source: source.to_string(),
                resolved_ref: fetched.as_ref().map(|f| f.resolved_ref.clone()),
                commit: fetched.as_ref().map(|f| f.commit.clone()),
                docs_dir: format!("{}/{name}", self.docs_root_label),
                index_checksum: checksum,
                fetched_at: Utc::now(),
            },
        );
        self.store.save(&lockfile)?;

        Ok(AddOutcome {
            name,
            commit: fetched.map(|f| f.commit),
            file_count: files.len(),
            replaced,
            changed,
            warnings,
        })
    }

    /// Re-fetch and re-inject one recorded document, or all of them.
    pub fn update(&self, name: Option<&str>) -> Result<Vec<AddOutcome>> {
        let lockfile = self.store.load()?;
        let names = match name {
            Some(n) => {
                if lockfile.get(n).is_none() {
                    return Err(Error::UnknownDocument { name: n.to_string() });
                }
                vec![n.to_string()]
            }
            None => lockfile.names(),
        };

        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            let Some(record) = lockfile.get(&name).cloned() else {
                continue;
            };
            outcomes.push(self.add(
                &record.source,
                Some(&name),
                record.resolved_ref.as_deref(),
                true,
            )?);
        }
        Ok(outcomes)
    }

    /// Remove a document: its block, its copied docs tree, and its lock
    /// record. When the last block goes, the wrapper goes too (deleting the
    /// target file if nothing else remains). Returns whether anything
    /// existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let editor = DocumentEditor::new(self.target.clone());
        let block_existed = editor.remove_block(name)?;

        io::remove_tree(&self.docs_root.join(name))?;

        let mut lockfile = self.store.load()?;
        let record_existed = lockfile.remove(name);
        self.store.save(&lockfile)?;

        if editor.block_names()?.is_empty() {
            editor.remove_wrapper()?;
        }

        tracing::debug!(%name, block_existed, record_existed, "removed document");
        Ok(block_existed || record_existed)
    }

    /// Read-only health check of every recorded document.
    pub fn check(&self) -> Result<Vec<CheckReport>> {
        let lockfile = self.store.load()?;
        let editor = DocumentEditor::new(self.target.clone());
        let present = editor.block_names()?;

        let mut reports = Vec::new();
        for (name, record) in lockfile.documents() {
            let docs_dir = self.docs_root.join(name);
            let files = if docs_dir.is_dir() {
                discover_files(&docs_dir)?
            } else {
                Vec::new()
            };
            let index = serialize(&files, name, &self.docs_root_label);
            reports.push(CheckReport {
                name: name.clone(),
                warnings: validate(&index),
                drifted: index_checksum(&index) != record.index_checksum,
                block_missing: !present.contains(name),
            });
        }
        Ok(reports)
    }

    /// The recorded documents with their metadata.
    pub fn list(&self) -> Result<Vec<(String, DocumentRecord)>> {
        let lockfile = self.store.load()?;
        Ok(lockfile
            .documents()
            .map(|(name, record)| (name.clone(), record.clone()))
            .collect())
    }

    /// Materialize the docs tree for `source` under the docs root.
    ///
    /// A source that is an existing local directory is copied directly; any
    /// other source is treated as a git URL, cloned into the cache, and
    /// copied from there (the hidden-entry skip keeps `.git` out).
    fn materialize(
        &self,
        source: &str,
        name: &str,
        reference: Option<&str>,
    ) -> Result<Option<FetchedRepo>> {
        let docs_dir = self.docs_root.join(name);
        io::remove_tree(&docs_dir)?;

        let source_path = NormalizedPath::new(source);
        if source_path.is_dir() {
            copy_tree(&source_path, &docs_dir)?;
            return Ok(None);
        }

        let checkout = self.cache_dir.join(name);
        let fetched = fetch_source(source, reference, &checkout)?;
        copy_tree(&fetched.local_path, &docs_dir)?;
        Ok(Some(fetched))
    }
}

/// Derive a document name from a source URL or path.
fn derive_name(source: &str) -> String {
    let tail = source
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(source);
    let tail = tail.strip_suffix(".git").unwrap_or(tail);
    let name = sanitize_name(tail);
    if name.is_empty() { "docs".to_string() } else { name }
}

/// Canonical `sha256:<hex>` checksum of an index document.
fn index_checksum(content: &str) -> String {
    format!("sha256:{:x}", Sha256::digest(content.as_bytes()))
}
