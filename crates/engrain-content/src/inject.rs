//! Pure wrapper/block mutations on document text
//!
//! Everything here operates on strings only; persistence lives in
//! [`crate::editor`]. Outside the mutated span, content is preserved
//! byte-for-byte.

use crate::marker::{WRAPPER_END, locate_block, locate_wrapper, render_block, wrapper_start};

/// Result of a pure injection attempt.
pub(crate) enum InjectOutcome {
    /// New document text, plus whether an existing block was replaced.
    Updated { source: String, existed: bool },
    /// Non-empty document with no wrapper region.
    NoWrapper,
    /// Block already present and force was not set.
    Conflict,
}

/// Inject (or with `force`, replace) the named block.
pub(crate) fn inject_block(source: &str, name: &str, body: &str, force: bool) -> InjectOutcome {
    let block = render_block(name, body);

    let Some(wrapper) = locate_wrapper(source) else {
        // Whitespace-only counts as empty: fresh wrapper around the block.
        if source.trim().is_empty() {
            let created = format!("{}\n{block}\n{WRAPPER_END}\n", wrapper_start());
            return InjectOutcome::Updated {
                source: created,
                existed: false,
            };
        }
        return InjectOutcome::NoWrapper;
    };

    if let Some(span) = locate_block(source, name) {
        if !force {
            return InjectOutcome::Conflict;
        }
        let mut out = String::with_capacity(source.len() + block.len());
        out.push_str(&source[..span.start]);
        out.push_str(&block);
        out.push_str(&source[span.end..]);
        return InjectOutcome::Updated {
            source: out,
            existed: true,
        };
    }

    // Append: blank line, the block, then the wrapper end marker.
    let end_marker_start = wrapper.end - WRAPPER_END.len();
    let head = source[..end_marker_start].trim_end();
    let tail = &source[end_marker_start..];
    InjectOutcome::Updated {
        source: format!("{head}\n\n{block}\n{tail}"),
        existed: false,
    }
}

/// Remove the named block, trimming surrounding blank lines so at most one
/// blank line separates the remaining neighbors. `None` when absent.
pub(crate) fn remove_block(source: &str, name: &str) -> Option<String> {
    let span = locate_block(source, name)?;
    let before = source[..span.start].trim_end();
    let after = source[span.end..].trim_start();
    Some(join_trimmed(before, after))
}

/// Remove the wrapper region and everything inside it. `None` when absent.
/// The result may be entirely empty; the caller decides whether that means
/// deleting the file.
pub(crate) fn remove_wrapper(source: &str) -> Option<String> {
    let span = locate_wrapper(source)?;
    let before = source[..span.start].trim_end();
    let after = source[span.end..].trim_start();
    Some(join_trimmed(before, after))
}

fn join_trimmed(before: &str, after: &str) -> String {
    match (before.is_empty(), after.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("{before}\n"),
        (true, false) => after.to_string(),
        (false, false) => format!("{before}\n\n{after}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{block_start, find_blocks};
    use pretty_assertions::assert_eq;

    fn updated(outcome: InjectOutcome) -> (String, bool) {
        match outcome {
            InjectOutcome::Updated { source, existed } => (source, existed),
            InjectOutcome::NoWrapper => panic!("unexpected NoWrapper"),
            InjectOutcome::Conflict => panic!("unexpected Conflict"),
        }
    }

    #[test]
    fn empty_document_grows_a_wrapper() {
        let (doc, existed) = updated(inject_block("", "x", "INDEX", false));
        assert!(!existed);
        assert!(doc.starts_with("<engrain important=\""));
        assert!(doc.ends_with("</engrain>\n"));
        assert_eq!(find_blocks(&doc).len(), 1);
    }

    #[test]
    fn whitespace_only_document_counts_as_empty() {
        let (doc, existed) = updated(inject_block("  \n\t\n", "x", "INDEX", false));
        assert!(!existed);
        assert_eq!(find_blocks(&doc).len(), 1);
    }

    #[test]
    fn nonempty_document_without_wrapper_is_rejected() {
        assert!(matches!(
            inject_block("# My notes\n", "x", "INDEX", false),
            InjectOutcome::NoWrapper
        ));
        // force does not override the missing wrapper
        assert!(matches!(
            inject_block("# My notes\n", "x", "INDEX", true),
            InjectOutcome::NoWrapper
        ));
    }

    #[test]
    fn force_replace_is_byte_stable() {
        let (first, _) = updated(inject_block("", "x", "A", false));
        let (second, existed) = updated(inject_block(&first, "x", "A", true));
        assert!(existed);
        assert_eq!(first, second);
    }

    #[test]
    fn conflict_without_force() {
        let (doc, _) = updated(inject_block("", "x", "A", false));
        assert!(matches!(
            inject_block(&doc, "x", "B", false),
            InjectOutcome::Conflict
        ));
    }

    #[test]
    fn replace_changes_only_the_block_span() {
        let (doc, _) = updated(inject_block("", "a", "A", false));
        let (doc, _) = updated(inject_block(&doc, "b", "B", false));
        let (replaced, existed) = updated(inject_block(&doc, "a", "A2", true));
        assert!(existed);
        assert!(replaced.contains("A2"));
        assert!(replaced.contains("B"));
        // Block b's rendering is untouched
        let b_before = &doc[locate_block(&doc, "b").unwrap()];
        let b_after = &replaced[locate_block(&replaced, "b").unwrap()];
        assert_eq!(b_before, b_after);
    }

    #[test]
    fn second_block_appends_inside_single_wrapper() {
        let (doc, _) = updated(inject_block("", "a", "A", false));
        let (doc, existed) = updated(inject_block(&doc, "b", "B", false));
        assert!(!existed);
        let blocks = find_blocks(&doc);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "a");
        assert_eq!(blocks[1].name, "b");
        assert_eq!(doc.matches("<engrain ").count(), 1);
        assert_eq!(doc.matches("</engrain>").count(), 1);
        // Blank line between the blocks
        let between = &doc[blocks[0].span.end..blocks[1].span.start];
        assert_eq!(between, "\n\n");
    }

    #[test]
    fn remove_absent_block_is_none() {
        let (doc, _) = updated(inject_block("", "a", "A", false));
        assert!(remove_block(&doc, "other").is_none());
    }

    #[test]
    fn remove_middle_block_leaves_one_blank_line() {
        let (doc, _) = updated(inject_block("", "a", "A", false));
        let (doc, _) = updated(inject_block(&doc, "b", "B", false));
        let (doc, _) = updated(inject_block(&doc, "c", "C", false));
        let out = remove_block(&doc, "b").unwrap();
        let blocks = find_blocks(&out);
        assert_eq!(blocks.len(), 2);
        let between = &out[blocks[0].span.end..blocks[1].span.start];
        assert_eq!(between, "\n\n");
    }

    #[test]
    fn remove_last_block_leaves_empty_wrapper() {
        let (doc, _) = updated(inject_block("", "a", "A", false));
        let out = remove_block(&doc, "a").unwrap();
        assert!(find_blocks(&out).is_empty());
        assert!(out.contains("<engrain "));
        assert!(out.contains("</engrain>"));
    }

    #[test]
    fn remove_wrapper_preserves_surrounding_content() {
        let (wrapper, _) = updated(inject_block("", "a", "A", false));
        let doc = format!("# Heading\n\n{wrapper}\nTrailing notes.\n");
        let out = remove_wrapper(&doc).unwrap();
        assert_eq!(out, "# Heading\n\nTrailing notes.\n");
    }

    #[test]
    fn remove_wrapper_from_wrapper_only_document_is_empty() {
        let (doc, _) = updated(inject_block("", "a", "A", false));
        let out = remove_wrapper(&doc).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn block_body_is_rendered_between_markers() {
        let (doc, _) = updated(inject_block("", "proj", "line1\nline2", false));
        let span = locate_block(&doc, "proj").unwrap();
        let block = &doc[span];
        assert!(block.starts_with(&block_start("proj")));
        assert!(block.ends_with("</docs>"));
        assert!(block.contains("line1\nline2"));
    }
}
