//! Marker-delimited block injection for engrain
//!
//! A target document carries at most one wrapper region
//! (`<engrain important="…">` … `</engrain>`) which in turn contains zero or
//! more named blocks (`<docs name="…">` … `</docs>`). This crate locates,
//! inserts, replaces, and removes those regions without touching any
//! unrelated content, and persists every mutation with an atomic write.

pub mod editor;
pub mod error;
mod inject;
pub mod marker;

pub use editor::DocumentEditor;
pub use error::{Error, Result};
pub use marker::{BlockRef, find_blocks, locate_block, locate_wrapper};
