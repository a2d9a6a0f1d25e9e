//! Resolve command
//!
//! Usage: pagequery resolve <QUERY> [--snapshot <FILE>] [--server-snapshot <FILE>] [--output <FILE>]

use clap::Args;
use pagequery_core::{diagnose, use_static_query, RuntimeConfig};
use pagequery_core_types::{RequestContext, RequestId};
use std::path::PathBuf;

use super::{load_snapshot, write_output};

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Query identifier emitted by the build transform
    pub query: String,

    /// Default-channel snapshot (JSON)
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Per-request snapshot; resolves as a server render
    #[arg(long)]
    pub server_snapshot: Option<PathBuf>,

    /// Request id to stamp on diagnostics (server renders only)
    #[arg(long, requires = "server_snapshot")]
    pub request_id: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute resolve command
pub fn execute(args: ResolveArgs, config: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = config.registry(load_snapshot(args.snapshot.as_deref())?);

    let scope = match args.server_snapshot.as_deref() {
        Some(path) => {
            let request = args
                .request_id
                .map(|id| RequestContext::with_request_id(RequestId::from_string(id)))
                .unwrap_or_default();
            registry.server_scope(load_snapshot(Some(path))?, request)
        }
        None => registry.client_scope(),
    };

    let payload = use_static_query(&scope, &args.query).map_err(|err| diagnose(&scope, err))?;
    let text = serde_json::to_string_pretty(payload)?;
    write_output(args.output.as_deref(), &text)?;

    Ok(())
}
