//! Comment-block synthesis: builds the structured doc block for one
//! declaration from its signature and (optionally) an index entry.
//!
//! Pure: the output depends only on the declaration's parameter list, its
//! return type, and the entry text. Line terminators and indentation are the
//! splice layer's business; this module deals in bare lines.

use crate::extract::Declaration;
use crate::index::DocEntry;

/// Synthesizes the full doc block for `decl`, as `///`-prefixed lines.
///
/// The block always opens with a summary section; parameter lines follow, one
/// per parameter, and a returns line closes the block when the declaration
/// returns a value.
pub fn synthesize(decl: &Declaration, entry: Option<&DocEntry>) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("/// <summary>".to_string());
    lines.extend(summary_body(entry));
    lines.push("/// </summary>".to_string());

    for param in &decl.params {
        lines.push(format!(
            "/// <param name=\"{}\"><see cref=\"{}\"/> parameter</param>",
            param.name, param.type_text
        ));
    }

    if let Some(ret) = decl.return_type.as_deref() {
        lines.push(format!(
            "/// <returns><see cref=\"{}\"/> value</returns>",
            ret
        ));
    }

    lines
}

/// Body lines between the summary tags. A missing entry or blank text still
/// yields one bare `///` line, so the summary section is never empty.
fn summary_body(entry: Option<&DocEntry>) -> Vec<String> {
    let text = match entry {
        Some(entry) if !entry.doc.trim().is_empty() => &entry.doc,
        _ => return vec!["///".to_string()],
    };
    text.split('\n')
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                "///".to_string()
            } else {
                format!("/// {}", line)
            }
        })
        .collect()
}
