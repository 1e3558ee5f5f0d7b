//! Core engine for `commentsync`: synchronizes externally-sourced
//! documentation text into the doc comments of a Rust source file.
//!
//! A JSON doc index maps declaration names to prose. The engine parses the
//! source with a declarative [`unsynn`] grammar, matches each callable
//! declaration (functions, methods, `fn`-pointer type aliases) against the
//! index by exact name, synthesizes a structured comment block, and splices
//! it back in over a [`ropey`] rope. Code outside the touched comment
//! regions round-trips byte-for-byte, and re-running with the same index is
//! a no-op.

pub mod debug;
pub mod export;
pub mod extract;
pub mod index;
pub mod merge;
pub mod parse;
pub mod splice;
pub mod sync;
pub mod synthesize;

pub use export::export_index;
pub use extract::{extract_declarations, DeclKind, Declaration, Param, ParseError};
pub use index::{DocEntry, DocIndex, IndexError};
pub use merge::MergeAction;
pub use sync::{sync_source, SyncOptions, SyncOutcome, SyncSummary};
