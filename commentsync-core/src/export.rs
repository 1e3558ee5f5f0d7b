//! The reverse direction: harvest existing doc comments out of a source
//! file into a documentation index, so hand-written docs can seed the JSON
//! sidecar instead of the other way around.

use crate::commentsync_debug;
use crate::extract::extract_declarations;
use crate::extract::ParseError;
use crate::index::{DocEntry, DocIndex};
use std::ops::Range;

/// Harvests the documented public declarations of a source file into an
/// index, in source order. Private and undocumented declarations are
/// skipped; trait requirements count as public.
pub fn export_index(source: &str) -> Result<DocIndex, ParseError> {
    if source.trim().is_empty() {
        return Ok(DocIndex::default());
    }
    let declarations = extract_declarations(source)?;
    let mut entries = Vec::new();
    for decl in &declarations {
        if !decl.public || !decl.has_doc() {
            continue;
        }
        let doc = doc_text(source, &decl.doc_spans);
        if doc.is_empty() {
            continue;
        }
        entries.push(DocEntry {
            name: decl.name.clone(),
            doc,
        });
    }
    commentsync_debug!("exported {} entry(s)", entries.len());
    Ok(DocIndex { entries })
}

/// Joins the prose of the attached doc runs, stripping the comment markers
/// and trimming trailing blank lines. Interior blank `///` lines survive as
/// paragraph breaks.
fn doc_text(source: &str, spans: &[Range<usize>]) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for span in spans {
        for line in source[span.clone()].lines() {
            if let Some(text) = strip_marker(line.trim()) {
                lines.push(text);
            }
        }
    }
    let mut doc = lines.join("\n");
    while doc.ends_with('\n') || doc.ends_with('\r') {
        doc.pop();
    }
    doc
}

/// Recovers the prose of one doc line: `/// text`, a `#[doc = "text"]`
/// attribute, or a `/** */` block line. Bare block delimiters yield nothing.
fn strip_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("///") {
        return Some(rest.strip_prefix(' ').unwrap_or(rest));
    }
    if line.starts_with("#[") {
        let first = line.find('"')?;
        let last = line.rfind('"')?;
        return (last > first).then(|| &line[first + 1..last]);
    }
    let mut rest = line;
    let mut delimited = false;
    if let Some(r) = rest.strip_prefix("/**") {
        rest = r;
        delimited = true;
    }
    if let Some(r) = rest.strip_suffix("*/") {
        rest = r;
        delimited = true;
    }
    if !delimited {
        rest = rest.strip_prefix('*')?;
    }
    let rest = rest.trim();
    if rest.is_empty() && delimited {
        return None;
    }
    Some(rest)
}
