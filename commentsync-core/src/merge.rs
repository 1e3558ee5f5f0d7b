//! Per-declaration merge policy: decides whether a declaration's doc comment
//! is regenerated or left as the author wrote it.

/// What to do with one declaration's doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// Synthesize a fresh block and attach it (replacing any existing one)
    Regenerate,
    /// Leave the existing comment untouched
    Preserve,
}

/// The decision table. Preservation only happens for a hand-written comment
/// with no index entry backing it, and only outside overwrite mode.
pub fn decide(has_existing: bool, has_entry: bool, overwrite: bool) -> MergeAction {
    match (overwrite, has_existing, has_entry) {
        (true, _, _) => MergeAction::Regenerate,
        (false, false, _) => MergeAction::Regenerate,
        (false, true, true) => MergeAction::Regenerate,
        (false, true, false) => MergeAction::Preserve,
    }
}
