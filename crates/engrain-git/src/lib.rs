//! Git source fetching for engrain
//!
//! Clones a documentation source repository and resolves a ref to a concrete
//! commit. The rest of the system consumes only the returned
//! `{ local_path, commit, resolved_ref }` triple.

pub mod error;
pub mod fetch;

pub use error::{Error, Result};
pub use fetch::{FetchedRepo, fetch_source};
