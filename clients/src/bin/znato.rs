//! `znato`: ontology maintenance from the command line.
//!
//! Subcommands:
//! - `find-duplicates` reports classes that are declared `owl:equivalentClass`
//!   or whose labels are near-identical
//! - `classes` lists the classes and properties of an ontology
//! - `build-ontology` turns a meta-graph JSON document into an RDFS ontology
//!
//! **Usage:**
//! ```
//! znato [--config <path>] [-v] find-duplicates <ontology.ttl> [-s 0.8] [--[no-]parallel]
//!       [--format table|json]
//! znato classes <ontology.ttl> [--format table|json]
//! znato build-ontology <meta_graph.json> [--output ontology.ttl] [--base-iri <iri>] [--ntriples]
//! ```
//!
//! Settings not given on the command line come from `znato.toml`.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use znato_clients::{logging, render, OutputFormat, Settings};
use znato_dedup::{Detector, Inventory};
use znato_graph::metagraph::validate_base_iri;
use znato_graph::serializer::{ntriples, turtle};
use znato_graph::{loader, MetaGraph};

/// Ontology duplicate detection and construction.
#[derive(Parser)]
#[command(
    name = "znato",
    version,
    about = "Find duplicate classes in an ontology and build ontologies from meta-graphs"
)]
struct Args {
    /// Settings file (default: ./znato.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report equivalent or near-identical classes.
    FindDuplicates(FindDuplicatesArgs),
    /// List the classes and properties of an ontology.
    Classes(ClassesArgs),
    /// Build an RDFS ontology from a meta-graph JSON document.
    BuildOntology(BuildOntologyArgs),
}

#[derive(clap::Args)]
struct FindDuplicatesArgs {
    /// Turtle ontology to scan.
    ontology: PathBuf,

    /// Minimum label similarity in (0, 1] (default: 0.8).
    #[arg(short = 's', long = "similarity")]
    similarity: Option<f64>,

    /// Scan class pairs on all cores.
    #[arg(long, overrides_with = "no_parallel")]
    parallel: bool,

    /// Scan class pairs on one thread, even if the config enables parallel.
    #[arg(long, overrides_with = "parallel")]
    no_parallel: bool,

    /// Output format (default: table).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl FindDuplicatesArgs {
    /// `Some` only when one of the two flags was given; the last one wins.
    fn parallel_flag(&self) -> Option<bool> {
        match (self.parallel, self.no_parallel) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(clap::Args)]
struct ClassesArgs {
    /// Turtle ontology to list.
    ontology: PathBuf,

    /// Output format (default: table).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(clap::Args)]
struct BuildOntologyArgs {
    /// Meta-graph JSON document.
    meta_graph: PathBuf,

    /// Output file.
    #[arg(short, long, default_value = "ontology.ttl")]
    output: PathBuf,

    /// Namespace for generated resources (default: http://example.org/ontology#).
    #[arg(long)]
    base_iri: Option<String>,

    /// Write N-Triples instead of Turtle.
    #[arg(long)]
    ntriples: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let settings = Settings::load(args.config.as_deref(), Path::new("."))?;

    match args.command {
        Command::FindDuplicates(cmd) => find_duplicates(&cmd, &settings),
        Command::Classes(cmd) => classes(&cmd, &settings),
        Command::BuildOntology(cmd) => build_ontology(&cmd, &settings),
    }
}

fn find_duplicates(cmd: &FindDuplicatesArgs, settings: &Settings) -> Result<()> {
    let config = settings.detector_config(cmd.similarity, cmd.parallel_flag());
    let detector = Detector::new(config)?;

    let path = cmd.ontology.display();
    let graph = loader::load_path(&cmd.ontology)
        .with_context(|| format!("Failed to load ontology {path}"))?;
    let report = detector.detect(&graph);

    match settings.output_format(cmd.format) {
        OutputFormat::Table => println!("{}", render::duplicates_table(&report)),
        OutputFormat::Json => println!("{}", render::json(&report)?),
    }
    Ok(())
}

fn classes(cmd: &ClassesArgs, settings: &Settings) -> Result<()> {
    let path = cmd.ontology.display();
    let graph = loader::load_path(&cmd.ontology)
        .with_context(|| format!("Failed to load ontology {path}"))?;
    let inventory = Inventory::collect(&graph);

    match settings.output_format(cmd.format) {
        OutputFormat::Table => print!("{}", render::inventory_table(&inventory)),
        OutputFormat::Json => println!("{}", render::json(&inventory)?),
    }
    Ok(())
}

fn build_ontology(cmd: &BuildOntologyArgs, settings: &Settings) -> Result<()> {
    let base_iri = settings.base_iri(cmd.base_iri.as_deref());
    validate_base_iri(base_iri)?;

    let text = std::fs::read_to_string(&cmd.meta_graph)
        .with_context(|| format!("Failed to read {}", cmd.meta_graph.display()))?;
    let meta = MetaGraph::from_json(&text)
        .with_context(|| format!("Failed to parse {}", cmd.meta_graph.display()))?;

    let graph = meta.to_graph(base_iri)?;

    let content = if cmd.ntriples {
        ntriples::to_ntriples(&graph)
    } else {
        turtle::to_turtle(&graph, &[("", base_iri)])
    };
    std::fs::write(&cmd.output, content)
        .with_context(|| format!("Failed to write {}", cmd.output.display()))?;

    let output = cmd.output.display();
    info!(triples = graph.len(), %output, "ontology written");
    println!("Wrote {} triples to {output}", graph.len());
    Ok(())
}
