//! Escaping codec and delimiter-aware string primitives
//!
//! Directory and file names may contain any of the delimiter characters the
//! index format reserves. `encode` prefixes each such character with the
//! escape character; the split/find primitives treat a delimiter as
//! structural only when it is preceded by an even run of escape characters.

use crate::{ITEM_DELIMITER, KEY_DELIMITER, LIST_CLOSE, LIST_OPEN, SECTION_DELIMITER};

/// The escape character.
pub const ESCAPE: char = '\\';

/// The delimiter characters that must be escaped inside name tokens.
pub const RESERVED: [char; 5] = [
    SECTION_DELIMITER,
    KEY_DELIMITER,
    LIST_OPEN,
    LIST_CLOSE,
    ITEM_DELIMITER,
];

/// Escape a raw token for embedding in an index document.
///
/// Prefixes the escape character before every occurrence of itself and of
/// the reserved delimiters. Scanning is a single left-to-right pass, so an
/// escape character inserted by the codec is never re-escaped.
pub fn encode(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for ch in token.chars() {
        if ch == ESCAPE || RESERVED.contains(&ch) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Reverse [`encode`]: strip one escape prefix per escaped character.
///
/// A trailing lone escape character (which `encode` never produces) is kept
/// as-is rather than dropped.
pub fn decode(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(ESCAPE),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Split `input` on unescaped occurrences of `delimiter`.
///
/// An occurrence counts as a delimiter only when preceded by an even
/// (possibly zero) number of consecutive escape characters. The returned
/// segments are raw (still escaped); callers decode them as needed.
pub fn split_unescaped(input: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escape_run = 0usize;
    for (idx, ch) in input.char_indices() {
        if ch == ESCAPE {
            escape_run += 1;
            continue;
        }
        if ch == delimiter && escape_run % 2 == 0 {
            parts.push(&input[start..idx]);
            start = idx + ch.len_utf8();
        }
        escape_run = 0;
    }
    parts.push(&input[start..]);
    parts
}

/// Byte offset of the first unescaped occurrence of `delimiter`, if any.
pub fn find_unescaped(input: &str, delimiter: char) -> Option<usize> {
    let mut escape_run = 0usize;
    for (idx, ch) in input.char_indices() {
        if ch == ESCAPE {
            escape_run += 1;
            continue;
        }
        if ch == delimiter && escape_run % 2 == 0 {
            return Some(idx);
        }
        escape_run = 0;
    }
    None
}

/// Whether the character starting at byte `idx` is escaped, i.e. preceded by
/// an odd run of escape characters.
pub(crate) fn is_escaped_at(input: &str, idx: usize) -> bool {
    let mut escape_run = 0usize;
    for b in input.as_bytes()[..idx].iter().rev() {
        if *b == b'\\' {
            escape_run += 1;
        } else {
            break;
        }
    }
    escape_run % 2 == 1
}
