//! Surgical text splicing: applies byte-ranged edits to source text through a
//! rope, leaving everything outside the edit ranges byte-for-byte intact.

use ropey::Rope;
use std::ops::Range;

/// One replacement against the original byte offsets. An empty range is a
/// pure insertion.
#[derive(Debug, Clone)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

/// Applies a batch of non-overlapping edits. Edits are applied in descending
/// start order so earlier ranges stay valid against the original offsets;
/// callers may hand them over in any order.
pub fn apply(source: &str, edits: Vec<Edit>) -> String {
    let mut edits = edits;
    edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));

    let mut rope = Rope::from_str(source);
    for edit in edits {
        let start = rope.byte_to_char(edit.range.start);
        let end = rope.byte_to_char(edit.range.end);
        rope.remove(start..end);
        rope.insert(start, &edit.text);
    }
    rope.to_string()
}
