//! Structural validation of index documents
//!
//! Validation is purely advisory: it never fails and never mutates its
//! input. Every structural problem is reported as a human-readable warning
//! string for the caller to surface.

use crate::escape::{find_unescaped, is_escaped_at, split_unescaped};
use crate::{ITEM_DELIMITER, KEY_DELIMITER, LIST_CLOSE, LIST_OPEN, SECTION_DELIMITER};

/// How much of a malformed section is quoted in its warning.
const PREVIEW_LEN: usize = 50;

/// Validate an index document, returning zero or more warnings.
///
/// The first three sections (header, root, instruction) are not checked
/// against the group grammar. Each remaining section must look like
/// `<dir>:{<file>,<file>}` with an unescaped key delimiter, list braces, and
/// item delimiters; empty file tokens (double-comma artifacts) are flagged
/// individually.
pub fn validate(doc: &str) -> Vec<String> {
    let mut warnings = Vec::new();
    let sections = split_unescaped(doc, SECTION_DELIMITER);

    if sections.len() <= 3 {
        warnings.push("index is empty: no directory sections present".to_string());
    }

    for section in sections.iter().skip(3) {
        match parse_section(section) {
            Some(items) => {
                for item in items {
                    if item.is_empty() {
                        warnings.push(format!(
                            "empty filename token detected in section \"{}\"",
                            preview(section)
                        ));
                    }
                }
            }
            None => warnings.push(format!("malformed section: \"{}\"", preview(section))),
        }
    }

    warnings
}

/// Split a group section into its raw file tokens, or `None` when the
/// section does not match the group grammar.
fn parse_section(section: &str) -> Option<Vec<&str>> {
    let colon = find_unescaped(section, KEY_DELIMITER)?;
    let rest = &section[colon + KEY_DELIMITER.len_utf8()..];
    if !rest.starts_with(LIST_OPEN) {
        return None;
    }
    if !section.ends_with(LIST_CLOSE) || is_escaped_at(section, section.len() - 1) {
        return None;
    }
    let inner = &rest[LIST_OPEN.len_utf8()..rest.len() - LIST_CLOSE.len_utf8()];
    Some(split_unescaped(inner, ITEM_DELIMITER))
}

fn preview(section: &str) -> String {
    section.chars().take(PREVIEW_LEN).collect()
}
