//! Orchestration for engrain
//!
//! Sequences the collaborators: fetch a documentation source, discover its
//! files, serialize and validate the index, inject it into the target
//! document, and record the result in the lock file.

pub mod engine;
pub mod error;
pub mod lockfile;

pub use engine::{AddOutcome, CheckReport, Engine};
pub use error::{Error, Result};
pub use lockfile::{DocumentRecord, LockStore, Lockfile, LOCKFILE_VERSION};
