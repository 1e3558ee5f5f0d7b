//! The documentation index: a JSON sidecar mapping declaration names to
//! prose summaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;

/// One index entry. `name` is matched exactly against declaration names;
/// `doc` is the summary prose, possibly multi-line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocEntry {
    pub name: String,
    pub doc: String,
}

/// The whole index, in file order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocIndex {
    pub entries: Vec<DocEntry>,
}

impl DocIndex {
    /// Parses an index from JSON text of the shape
    /// `{ "entries": [ { "name": ..., "doc": ... }, ... ] }`.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses an index file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| IndexError::Io(path.display().to_string(), e))?;
        Self::from_json(&json)
    }

    /// Serializes the index back to pretty-printed JSON, for export runs.
    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Finds the entry for a declaration name. Exact match only; when the
    /// index holds duplicates, the first entry wins.
    pub fn lookup(&self, name: &str) -> Option<&DocEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Errors raised while loading a documentation index.
#[derive(Debug)]
pub enum IndexError {
    /// The index file could not be read
    Io(String, io::Error),
    /// The file contents are not a valid index
    Decode(serde_json::Error),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Io(path, e) => write!(f, "failed to read index {}: {}", path, e),
            IndexError::Decode(e) => write!(f, "invalid index JSON: {}", e),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::Io(_, e) => Some(e),
            IndexError::Decode(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(e: serde_json::Error) -> Self {
        IndexError::Decode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_in_order() {
        let index = DocIndex::from_json(
            r#"{"entries": [
                {"name": "alpha", "doc": "First."},
                {"name": "beta", "doc": "Second."}
            ]}"#,
        )
        .unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.entries[0].name, "alpha");
        assert_eq!(index.entries[1].doc, "Second.");
    }

    #[test]
    fn lookup_is_exact() {
        let index =
            DocIndex::from_json(r#"{"entries": [{"name": "Process", "doc": "Runs the thing."}]}"#)
                .unwrap();
        assert!(index.lookup("Process").is_some());
        assert!(index.lookup("process").is_none());
        assert!(index.lookup("Proc").is_none());
    }

    #[test]
    fn duplicate_names_resolve_to_first() {
        let index = DocIndex::from_json(
            r#"{"entries": [
                {"name": "run", "doc": "Wins."},
                {"name": "run", "doc": "Loses."}
            ]}"#,
        )
        .unwrap();
        assert_eq!(index.lookup("run").unwrap().doc, "Wins.");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = DocIndex::from_json("{not json").unwrap_err();
        assert!(matches!(err, IndexError::Decode(_)));
    }

    #[test]
    fn rejects_missing_fields() {
        let err = DocIndex::from_json(r#"{"entries": [{"name": "orphan"}]}"#).unwrap_err();
        assert!(matches!(err, IndexError::Decode(_)));
    }

    #[test]
    fn load_reads_a_file_and_reports_missing_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, r#"{"entries": [{"name": "a", "doc": "A."}]}"#).unwrap();
        assert_eq!(DocIndex::load(&path).unwrap().len(), 1);

        let err = DocIndex::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, IndexError::Io(_, _)));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn serialized_index_parses_back() {
        let index = DocIndex {
            entries: vec![DocEntry {
                name: "run".to_string(),
                doc: "Runs.".to_string(),
            }],
        };
        let back = DocIndex::from_json(&index.to_json().unwrap()).unwrap();
        assert_eq!(back.entries, index.entries);
    }

    #[test]
    fn empty_index_is_valid() {
        let index = DocIndex::from_json(r#"{"entries": []}"#).unwrap();
        assert!(index.is_empty());
        assert!(index.lookup("anything").is_none());
    }
}
