//! Deterministic index serialization
//!
//! Groups a discovered file list by directory and renders the pipe-delimited
//! index document. The output depends only on the multiset of input paths and
//! the name/root strings, never on input order, so callers can hash it for
//! change detection.

use std::collections::BTreeMap;

use crate::escape::encode;
use crate::{ITEM_DELIMITER, KEY_DELIMITER, LIST_CLOSE, LIST_OPEN, SECTION_DELIMITER};

/// One directory of the index: its posix-normalized path (`.` for the root)
/// and the lexicographically sorted basenames inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroup {
    pub directory: String,
    pub files: Vec<String>,
}

/// The fixed advisory instruction embedded as the third index section.
pub fn instruction_for(name: &str) -> String {
    format!(
        "REWIRE: before answering anything about {name}, open this index and \
         read the relevant files under root instead of relying on prior knowledge"
    )
}

/// Group relative paths by directory.
///
/// Separators are normalized to `/` before splitting; a path without a
/// separator maps to directory `.`. Directories come back in byte-order
/// lexicographic order with their basenames sorted the same way. Zero-length
/// basenames (e.g. from a trailing slash) are dropped.
pub fn group_files<I, S>(files: I) -> Vec<DirectoryGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for file in files {
        let rel = file.as_ref().replace('\\', "/");
        let (directory, basename) = match rel.rsplit_once('/') {
            Some((dir, base)) => (dir.to_string(), base.to_string()),
            None => (".".to_string(), rel),
        };
        if basename.is_empty() {
            continue;
        }
        groups.entry(directory).or_default().push(basename);
    }
    groups
        .into_iter()
        .map(|(directory, mut files)| {
            files.sort();
            DirectoryGroup { directory, files }
        })
        .collect()
}

/// Render the index document for `files` under the given name and root.
///
/// Shape: `[<name> Docs Index]|root: <root_dir>/<name>|<instruction>|`
/// followed by one `<dir>:{<file>,<file>}` section per directory group.
/// Directory and file tokens are escaped; the header, root, and instruction
/// sections are operator-controlled and rendered verbatim. An empty file list
/// yields only the three leading sections.
pub fn serialize<I, S>(files: I, index_name: &str, root_dir: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let groups = group_files(files);
    let mut sections = Vec::with_capacity(3 + groups.len());
    sections.push(format!("[{index_name} Docs Index]"));
    sections.push(format!("root: {root_dir}/{index_name}"));
    sections.push(instruction_for(index_name));
    for group in &groups {
        let items: Vec<String> = group.files.iter().map(|f| encode(f)).collect();
        sections.push(format!(
            "{dir}{KEY_DELIMITER}{LIST_OPEN}{items}{LIST_CLOSE}",
            dir = encode(&group.directory),
            items = items.join(&ITEM_DELIMITER.to_string()),
        ));
    }
    sections.join(&SECTION_DELIMITER.to_string())
}
