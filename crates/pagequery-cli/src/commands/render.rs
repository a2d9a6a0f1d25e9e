//! Render command
//!
//! Usage: pagequery render <QUERY> [--snapshot <FILE>] [--data <FILE>] [--output <FILE>]

use clap::Args;
use pagequery_core::{diagnose, Payload, QueryResult, RuntimeConfig, StaticQuery};
use std::path::PathBuf;

use super::{load_snapshot, write_output};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Query identifier emitted by the build transform
    pub query: String,

    /// Ambient default-channel snapshot (JSON)
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Result supplied directly to the node, as `{"data": ...}` (JSON)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute render command
pub fn execute(args: RenderArgs, config: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = config.registry(load_snapshot(args.snapshot.as_deref())?);
    let scope = registry.client_scope();

    let direct: Option<QueryResult> = match args.data.as_deref() {
        Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => None,
    };

    let mut node = StaticQuery::new(args.query.as_str()).render(|payload: &Payload| {
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
    });
    if let Some(result) = direct.as_ref() {
        node = node.data(result);
    }

    let rendered = node.mount(&scope).map_err(|err| diagnose(&scope, err))?;
    write_output(args.output.as_deref(), &rendered.to_string())?;

    Ok(())
}
