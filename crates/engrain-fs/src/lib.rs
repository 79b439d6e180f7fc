//! Filesystem abstraction for engrain
//!
//! Provides normalized cross-platform paths, atomic file I/O, and the
//! documentation-tree discovery and copy operations the engine consumes.

pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use walk::{copy_tree, discover_files, sanitize_name};
