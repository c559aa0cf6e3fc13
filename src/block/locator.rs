//! Block locator.
//!
//! Finds `%{ ... %}` sections in a document. Both markers must be alone on
//! their lines (horizontal whitespace around them is allowed). Matching is
//! non-greedy: each opener pairs with the nearest following closer line, so
//! `%{ A %} B %{ C %}` yields two fragments, never one spanning the gap.
//! An opener with no closer before end of document is simply not a fragment.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// A `%{` line, the shortest possible body, then the nearest `%}` line.
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^([ \t]*%\{[ \t]*\n)(.*?)\n([ \t]*%\}[ \t]*)$").unwrap());

/// One delimited code block within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Byte range of the whole block in the document
    pub span: Range<usize>,
    /// Opening delimiter line, verbatim, including its newline
    pub open: &'a str,
    /// Inner text, verbatim, without the newline preceding the closer
    pub body: &'a str,
    /// Closing delimiter line, verbatim, without its leading newline
    pub close: &'a str,
}

/// Locate every block in `text`, in document order, non-overlapping.
///
/// A document without markers yields an empty list; that is not an error.
#[must_use]
pub fn locate_fragments(text: &str) -> Vec<Fragment<'_>> {
    BLOCK_RE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("group 0 always participates");
            Fragment {
                span: whole.range(),
                open: caps.get(1).map_or("", |m| m.as_str()),
                body: caps.get(2).map_or("", |m| m.as_str()),
                close: caps.get(3).map_or("", |m| m.as_str()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers() {
        assert!(locate_fragments("just text\nno blocks here\n").is_empty());
    }

    #[test]
    fn test_single_block() {
        let text = "DECLARE\n%{\nint x;\n%}\n";
        let fragments = locate_fragments(text);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].open, "%{\n");
        assert_eq!(fragments[0].body, "int x;");
        assert_eq!(fragments[0].close, "%}");
        assert_eq!(&text[fragments[0].span.clone()], "%{\nint x;\n%}");
    }

    #[test]
    fn test_non_greedy_two_fragments() {
        let text = "%{\nA\n%}\nB\n%{\nC\n%}\n";
        let fragments = locate_fragments(text);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].body, "A");
        assert_eq!(fragments[1].body, "C");
    }

    #[test]
    fn test_indented_markers() {
        let text = "  %{  \n  code;\n\t%}\t\n";
        let fragments = locate_fragments(text);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].open, "  %{  \n");
        assert_eq!(fragments[0].body, "  code;");
        assert_eq!(fragments[0].close, "\t%}\t");
    }

    #[test]
    fn test_marker_with_trailing_content_not_recognized() {
        // %{ followed by code on the same line is not a block opener
        let text = "DECLARE %{\nint x;\n%}\n";
        assert!(locate_fragments(text).is_empty());
    }

    #[test]
    fn test_closer_mid_line_not_recognized() {
        let text = "%{\nint x; %}\nreal close follows\n%}\n";
        let fragments = locate_fragments(text);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].body, "int x; %}\nreal close follows");
    }

    #[test]
    fn test_unmatched_opener_silently_skipped() {
        let text = "%{\nnever closed\n";
        assert!(locate_fragments(text).is_empty());
    }

    #[test]
    fn test_unmatched_opener_after_valid_block() {
        let text = "%{\nA\n%}\ntail\n%{\nno close\n";
        let fragments = locate_fragments(text);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].body, "A");
    }

    #[test]
    fn test_empty_body_block() {
        // A single blank line between the markers is an empty body
        let text = "%{\n\n%}\n";
        let fragments = locate_fragments(text);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].body, "");
    }

    #[test]
    fn test_adjacent_markers_not_a_block() {
        // %{ directly followed by %} has no body line and does not match;
        // the document is left as-is
        let text = "%{\n%}\n";
        assert!(locate_fragments(text).is_empty());
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let text = "a\n%{\n1\n%}\nb\n%{\n2\n%}\nc\n%{\n3\n%}\n";
        let fragments = locate_fragments(text);
        assert_eq!(fragments.len(), 3);
        for pair in fragments.windows(2) {
            assert!(pair[0].span.end <= pair[1].span.start);
        }
    }

    #[test]
    fn test_at_end_of_document_without_trailing_newline() {
        let text = "%{\nx;\n%}";
        let fragments = locate_fragments(text);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].body, "x;");
    }
}
