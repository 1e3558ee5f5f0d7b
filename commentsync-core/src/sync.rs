//! The synchronization pipeline: extract declarations, decide each one's
//! merge action, synthesize replacement blocks, and splice them back in.

use crate::commentsync_debug;
use crate::extract::{extract_declarations, Declaration, ParseError};
use crate::index::DocIndex;
use crate::merge::{self, MergeAction};
use crate::splice::{self, Edit};
use crate::synthesize::synthesize;

/// Run-wide configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Regenerate every declaration's comment, indexed or not
    pub overwrite: bool,
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub declarations: usize,
    pub regenerated: usize,
    pub preserved: usize,
}

/// Result of a synchronization run.
#[derive(Debug)]
pub struct SyncOutcome {
    /// The full rewritten source text
    pub text: String,
    pub summary: SyncSummary,
}

/// Synchronizes one source file's doc comments against the index.
///
/// Edits are computed against the original byte offsets and applied in one
/// batch, so the text outside regenerated comment blocks comes through
/// byte-for-byte. Running the output through the same index again is a
/// no-op.
pub fn sync_source(
    source: &str,
    index: &DocIndex,
    options: &SyncOptions,
) -> Result<SyncOutcome, ParseError> {
    // A blank file has nothing to synchronize; the grammar wants at least
    // one item, so short-circuit instead of reporting a parse failure.
    if source.trim().is_empty() {
        return Ok(SyncOutcome {
            text: source.to_string(),
            summary: SyncSummary::default(),
        });
    }

    let declarations = extract_declarations(source)?;
    let eol = if source.contains("\r\n") { "\r\n" } else { "\n" };

    let mut summary = SyncSummary {
        declarations: declarations.len(),
        ..SyncSummary::default()
    };
    let mut edits = Vec::new();

    for decl in &declarations {
        let entry = index.lookup(&decl.name);
        match merge::decide(decl.has_doc(), entry.is_some(), options.overwrite) {
            MergeAction::Preserve => {
                commentsync_debug!("preserving existing comment on {}", decl.name);
                summary.preserved += 1;
            }
            MergeAction::Regenerate => {
                commentsync_debug!(
                    "regenerating comment on {} ({} indexed)",
                    decl.name,
                    if entry.is_some() { "is" } else { "not" }
                );
                edits.extend(comment_edits(source, decl, synthesize(decl, entry), eol));
                summary.regenerated += 1;
            }
        }
    }

    Ok(SyncOutcome {
        text: splice::apply(source, edits),
        summary,
    })
}

/// Builds the edits that attach a synthesized block to `decl`: a replacement
/// of the first doc run (or an insertion at the declaration's first token
/// when there is none), plus whole-line removals for any later doc runs.
/// Non-doc attributes between runs stay untouched.
fn comment_edits(source: &str, decl: &Declaration, lines: Vec<String>, eol: &str) -> Vec<Edit> {
    let mut edits = Vec::new();
    match decl.doc_spans.first() {
        Some(span) => {
            let indent = line_indent(source, span.start);
            edits.push(Edit {
                text: lines.join(&format!("{}{}", eol, indent)),
                range: span.clone(),
            });
        }
        None => {
            let indent = line_indent(source, decl.anchor);
            let mut text = lines.join(&format!("{}{}", eol, indent));
            text.push_str(eol);
            text.push_str(&indent);
            edits.push(Edit {
                range: decl.anchor..decl.anchor,
                text,
            });
        }
    }
    for span in decl.doc_spans.iter().skip(1) {
        edits.push(Edit {
            range: full_lines(source, span),
            text: String::new(),
        });
    }
    edits
}

/// Widens a byte range to cover its lines whole, so deleting it takes the
/// indentation and the trailing newline with it. The start only moves when
/// the prefix is pure whitespace.
fn full_lines(source: &str, span: &std::ops::Range<usize>) -> std::ops::Range<usize> {
    let line_start = source[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let start = if source[line_start..span.start]
        .chars()
        .all(|c| c == ' ' || c == '\t')
    {
        line_start
    } else {
        span.start
    };
    let rest = &source[span.end..];
    let end = match rest.find('\n') {
        Some(i)
            if rest[..i]
                .trim_end_matches('\r')
                .chars()
                .all(|c| c == ' ' || c == '\t') =>
        {
            span.end + i + 1
        }
        Some(_) => span.end,
        None => source.len(),
    };
    start..end
}

/// Leading whitespace of the line containing `offset`. Continuation lines of
/// a spliced block reuse it so the block sits at the declaration's own depth.
fn line_indent(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}
