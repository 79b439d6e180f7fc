//! Marker grammar and span location
//!
//! Marker matching is exact and case-sensitive. Block lookup matches the full
//! start-marker literal for a name, never a substring of another name.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Fixed advisory text carried by the wrapper start marker.
pub const WRAPPER_ADVISORY: &str = "Generated by engrain. The blocks below index external \
documentation trees; regenerate them with the engrain CLI instead of editing by hand.";

/// Prefix shared by every wrapper start marker.
pub const WRAPPER_OPEN_PREFIX: &str = "<engrain ";

/// Wrapper end marker.
pub const WRAPPER_END: &str = "</engrain>";

/// Block end marker.
pub const BLOCK_END: &str = "</docs>";

/// Pattern matching block start markers, capturing the name attribute.
static BLOCK_START_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<docs name="([^"]*)">"#).unwrap());

/// Render the wrapper start marker.
pub fn wrapper_start() -> String {
    format!("<engrain important=\"{WRAPPER_ADVISORY}\">")
}

/// Render the start marker for a named block.
pub fn block_start(name: &str) -> String {
    format!("<docs name=\"{name}\">")
}

/// Render a complete block: start marker, body, end marker.
pub fn render_block(name: &str, body: &str) -> String {
    format!("{}\n{}\n{BLOCK_END}", block_start(name), body.trim_end())
}

/// A named block found in a document, with its full span (markers included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRef {
    pub name: String,
    pub span: Range<usize>,
}

/// Locate the wrapper region: first wrapper start marker, then the first end
/// marker after it. `None` when either is absent.
pub fn locate_wrapper(source: &str) -> Option<Range<usize>> {
    let start = source.find(WRAPPER_OPEN_PREFIX)?;
    let end = source[start..].find(WRAPPER_END)? + start;
    Some(start..end + WRAPPER_END.len())
}

/// Locate the block with exactly this name. `None` when the start marker or
/// its end marker is absent.
pub fn locate_block(source: &str, name: &str) -> Option<Range<usize>> {
    let start_marker = block_start(name);
    let start = source.find(&start_marker)?;
    let after = start + start_marker.len();
    let end = source[after..].find(BLOCK_END)? + after;
    Some(start..end + BLOCK_END.len())
}

/// Every block in the document, in document order.
pub fn find_blocks(source: &str) -> Vec<BlockRef> {
    let mut blocks = Vec::new();
    for cap in BLOCK_START_PATTERN.captures_iter(source) {
        let Some(name) = cap.get(1) else { continue };
        let start_match = cap.get(0).expect("capture 0 always present");
        let after = start_match.end();
        let Some(end) = source[after..].find(BLOCK_END) else {
            continue;
        };
        blocks.push(BlockRef {
            name: name.as_str().to_string(),
            span: start_match.start()..after + end + BLOCK_END.len(),
        });
    }
    blocks
}
