//! `shapeless` CLI — inspect JSON, YAML, TOML and BSON documents without a schema.
//!
//! ## Usage
//!
//! ```sh
//! # Report the detected format and root kind (stdin → stdout)
//! echo '{"a":{"b":[1,2]}}' | shapeless inspect
//!
//! # Navigate a dotted path; sequence positions are plain numbers
//! shapeless get a.b.1 -i data.yaml
//!
//! # List keys (or positions) at a path
//! shapeless keys a -i data.json
//!
//! # Print every type predicate for the value at a path
//! shapeless check a.b.0 -i data.toml --format toml
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shapeless_core::{detect, Format, Node, Object};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shapeless",
    version,
    about = "Schema-less inspection of JSON/YAML/TOML/BSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder diagnostics to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where to read the document from and how to decode it.
#[derive(clap::Args)]
struct Source {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Input format: json, yaml, toml or bson (auto-detected if omitted)
    #[arg(short, long)]
    format: Option<Format>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected format and the kind of the root value
    Inspect {
        #[command(flatten)]
        source: Source,
    },
    /// Print the value at a dotted path
    Get {
        /// Dotted path, e.g. `servers.0.host`
        path: String,
        #[command(flatten)]
        source: Source,
    },
    /// List the keys (or sequence positions) at a dotted path
    Keys {
        /// Dotted path; the root when omitted
        path: Option<String>,
        #[command(flatten)]
        source: Source,
    },
    /// Print every type predicate for the value at a dotted path
    Check {
        /// Dotted path; the root when omitted
        path: Option<String>,
        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Inspect { source } => {
            let (format, root) = load(&source)?;
            println!("format: {format}");
            println!("kind:   {}", root.kind());
        }
        Commands::Get { path, source } => {
            let (_, root) = load(&source)?;
            let node = navigate(&Object::from_node(&root), &path)?;
            println!("{node}");
        }
        Commands::Keys { path, source } => {
            let (_, root) = load(&source)?;
            let node = navigate(&Object::from_node(&root), path.as_deref().unwrap_or(""))?;
            for key in Object::from_node(&node).keys() {
                println!("{key}");
            }
        }
        Commands::Check { path, source } => {
            let (_, root) = load(&source)?;
            let node = navigate(&Object::from_node(&root), path.as_deref().unwrap_or(""))?;
            for (name, value) in predicate_report(&Object::from_node(&node)) {
                println!("{name}: {value}");
            }
        }
    }

    Ok(())
}

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read and decode the document, returning the format that decoded it.
fn load(source: &Source) -> Result<(Format, Node)> {
    let data = read_input(source.input.as_deref())?;
    match source.format {
        Some(format) => {
            let node = format
                .decode(&data)
                .with_context(|| format!("Failed to decode input as {format}"))?;
            Ok((format, node))
        }
        None => detect(&data).context("Failed to decode input as json, yaml, toml or bson"),
    }
}

/// Follow a dotted path from `root`. An empty path selects the root itself.
fn navigate(root: &Object<'_>, path: &str) -> Result<Node> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    walk(root, &segments, path)
}

fn walk(obj: &Object<'_>, segments: &[&str], path: &str) -> Result<Node> {
    let Some((segment, rest)) = segments.split_first() else {
        return obj
            .to_result()
            .cloned()
            .context("Path resolved to a missing value");
    };
    debug!(%segment, "navigating");
    let next = obj.get(segment);
    next.to_result()
        .with_context(|| format!("Failed to resolve '{segment}' in path '{path}'"))?;
    walk(&next, rest, path)
}

/// Every predicate, in a stable order, for the `check` subcommand.
fn predicate_report(obj: &Object<'_>) -> Vec<(&'static str, bool)> {
    vec![
        ("exists", obj.exists()),
        ("is_nil", obj.is_nil()),
        ("is_empty", obj.is_empty()),
        ("is_map", obj.is_map()),
        ("is_sequence", obj.is_sequence()),
        ("is_int_strict", obj.is_int_strict()),
        ("is_int", obj.is_int()),
        ("is_float_strict", obj.is_float_strict()),
        ("is_float", obj.is_float()),
        ("is_number_strict", obj.is_number_strict()),
        ("is_number", obj.is_number()),
        ("is_string_strict", obj.is_string_strict()),
        ("is_string", obj.is_string()),
        ("is_bool_strict", obj.is_bool_strict()),
        ("is_bool", obj.is_bool()),
    ]
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
