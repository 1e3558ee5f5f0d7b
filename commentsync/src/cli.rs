//! Command-line interface for synchronizing doc comments from a JSON index,
//! or exporting existing comments into one.

use commentsync_core::{export_index, sync_source, DocIndex, SyncOptions};
use facet::Facet;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Facet)]
struct Args {
    /// Path to the Rust source file to synchronize
    #[facet(positional, default = String::new())]
    source: String,

    /// Path to the documentation index JSON
    #[facet(named, short = 'j', long, default)]
    json: Option<String>,

    /// Regenerate every comment, replacing hand-written ones
    #[facet(named, rename = "force", short = 'f', long, default)]
    overwrite: bool,

    /// Write the source file's existing doc comments to the index instead
    #[facet(named, short = 'e', long, default)]
    export: bool,

    /// Run the pipeline but do not write the result back
    #[facet(named, short = 'n', long, default)]
    dry_run: bool,

    /// Show per-run counters on stderr
    #[facet(named, short = 'v', long, default)]
    verbose: bool,

    /// Show this help message
    #[facet(named, short = 'h', long, default)]
    help: bool,
}

fn print_usage() {
    println!("Usage: commentsync <SOURCE> --json <INDEX> [OPTIONS]");
    println!();
    println!("Synchronize doc comments in a Rust source file from a JSON index.");
    println!();
    println!("Arguments:");
    println!("  <SOURCE>            Path to the Rust source file to synchronize");
    println!();
    println!("Options:");
    println!("  -j, --json <file>   Path to the documentation index JSON");
    println!("  -f, --force         Regenerate every comment, replacing hand-written ones");
    println!("  -e, --export        Write the source's existing doc comments to the index");
    println!("  -n, --dry-run       Run the pipeline but do not write the result back");
    println!("  -v, --verbose       Show per-run counters on stderr");
    println!("  -h, --help          Show this help message");
    println!();
    println!("Examples:");
    println!("  # Fill in missing comments and refresh indexed ones.");
    println!("  commentsync src/lib.rs --json docs/index.json");
    println!();
    println!("  # Regenerate everything, including hand-written comments.");
    println!("  commentsync src/lib.rs --json docs/index.json --force");
    println!();
    println!("  # See what would change without touching the file.");
    println!("  commentsync src/lib.rs --json docs/index.json --dry-run --verbose");
    println!();
    println!("  # Harvest the file's existing doc comments into the index.");
    println!("  commentsync src/lib.rs --json docs/index.json --export");
}

/// Entry point for the `commentsync` command-line interface.
///
/// # Errors
///
/// Returns an [`io::Error`] if command-line argument parsing fails or the
/// source file cannot be read or written. Missing inputs and parse failures
/// exit with a non-zero status after a diagnostic on stderr.
pub fn main() -> io::Result<()> {
    let args: Args = facet_args::from_std_args()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{e}")))?;

    if args.help {
        print_usage();
        std::process::exit(0);
    }

    if args.source.is_empty() {
        eprintln!("Error: Missing required <SOURCE> argument");
        eprintln!("Run `commentsync --help` for usage.");
        std::process::exit(1);
    }

    let source_path = Path::new(&args.source);
    if !source_path.exists() {
        eprintln!("Error: Source file does not exist: {}", args.source);
        std::process::exit(1);
    }

    let Some(json) = args.json.as_deref() else {
        eprintln!("Error: Missing required --json <INDEX> argument");
        eprintln!("Run `commentsync --help` for usage.");
        std::process::exit(1);
    };
    let json_path = Path::new(json);

    // Export runs in the opposite direction: the index path is the output,
    // so it does not need to exist yet.
    if args.export {
        let source = fs::read_to_string(source_path)?;
        let index = match export_index(&source) {
            Ok(index) => index,
            Err(e) => {
                eprintln!("Error: Failed to parse {}: {}", args.source, e);
                std::process::exit(1);
            }
        };
        if args.verbose {
            eprintln!("Source file: {}", source_path.display());
            eprintln!("Exported: {} entry(s)", index.len());
        }
        let text = match index.to_json() {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        if args.dry_run {
            eprintln!("Dry run: {} not modified", json);
        } else {
            fs::write(json_path, format!("{}\n", text))?;
        }
        println!("Comments exported successfully.");
        return Ok(());
    }

    if !json_path.exists() {
        eprintln!("Error: Index file does not exist: {}", json);
        std::process::exit(1);
    }

    let index = match DocIndex::load(json_path) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.verbose {
        eprintln!("Source file: {}", source_path.display());
        eprintln!("Index: {} ({} entry(s))", json, index.len());
        eprintln!("Overwrite: {}", args.overwrite);
    }

    let source = fs::read_to_string(source_path)?;
    let options = SyncOptions {
        overwrite: args.overwrite,
    };

    let outcome = match sync_source(&source, &index, &options) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: Failed to parse {}: {}", args.source, e);
            std::process::exit(1);
        }
    };

    if args.verbose {
        eprintln!(
            "Declarations: {} ({} regenerated, {} preserved)",
            outcome.summary.declarations,
            outcome.summary.regenerated,
            outcome.summary.preserved
        );
    }

    if args.dry_run {
        eprintln!("Dry run: {} not modified", args.source);
    } else {
        fs::write(source_path, &outcome.text)?;
    }

    println!("Comments synchronized successfully.");
    Ok(())
}
