//! Pipe-delimited docs index format for engrain
//!
//! Provides the escaping codec, the deterministic serializer that turns a
//! discovered file list into an index document, and the structural validator
//! that re-parses index documents and reports malformations as warnings.

pub mod escape;
pub mod serialize;
pub mod validate;

pub use escape::{ESCAPE, RESERVED, decode, encode, find_unescaped, split_unescaped};
pub use serialize::{DirectoryGroup, group_files, instruction_for, serialize};
pub use validate::validate;

/// Joins the sections of an index document.
pub const SECTION_DELIMITER: char = '|';
/// Separates a directory key from its file list.
pub const KEY_DELIMITER: char = ':';
/// Opens a file list.
pub const LIST_OPEN: char = '{';
/// Closes a file list.
pub const LIST_CLOSE: char = '}';
/// Separates files within a list.
pub const ITEM_DELIMITER: char = ',';
