//! commentsync: synchronize externally-sourced documentation into the doc
//! comments of a Rust source file.
#![allow(clippy::multiple_crate_versions)]

mod cli;

fn main() -> std::io::Result<()> {
    cli::main()
}
