// SPDX-License-Identifier: MIT OR Apache-2.0
//! GraphScript viewer CLI.
//!
//! Decodes an ADF GraphScript file and emits the position-annotated graph
//! as JSON for node-editor frontends:
//! - Container parsing (ADF v2–v4, both byte orders)
//! - GraphScript tree decode with name resolution
//! - Flow/variable connection extraction
//! - Deterministic layered layout

use anyhow::{Context, Result};
use clap::Parser;
use gsview_adf::{hash, script, AdfFile};
use gsview_graph::ViewGraph;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "gsview", version, about = "Decode an ADF GraphScript file to positioned graph JSON")]
struct Args {
    /// ADF GraphScript file to decode
    input: PathBuf,

    /// Write the JSON product here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON product
    #[arg(long)]
    pretty: bool,

    /// Merge an external engine name dictionary before decoding
    #[arg(long)]
    dictionary: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gsview_adf=info".parse().unwrap())
                .add_directive("gsview_graph=info".parse().unwrap())
                .add_directive("gsview_app=info".parse().unwrap()),
        )
        .init();

    if let Err(e) = run(&Args::parse()) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.dictionary {
        hash::load_dictionary(path)
            .with_context(|| format!("loading dictionary {}", path.display()))?;
    }

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let started = Instant::now();
    let adf = AdfFile::parse(&bytes)?;
    let instance = adf.first_instance()?;
    let payload = adf.payload(instance)?;
    let graph = script::decode(payload, adf.endian)?;
    let view = ViewGraph::build(&graph, adf.endian);
    tracing::info!(
        instance = %instance.name,
        nodes = view.node_count(),
        edges = view.edge_count(),
        elapsed = ?started.elapsed(),
        "decoded graph"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote graph JSON");
        }
        None => println!("{json}"),
    }
    Ok(())
}
