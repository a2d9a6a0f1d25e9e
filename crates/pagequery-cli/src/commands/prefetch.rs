//! Prefetch command
//!
//! Usage: pagequery prefetch <PATHNAME>...

use clap::Args;
use pagequery_core::{install_loader, prefetch_pathname, QueueLoader};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct PrefetchArgs {
    /// Pathnames to enqueue, in order
    #[arg(required = true)]
    pub pathnames: Vec<String>,
}

/// Execute prefetch command
///
/// Prints the loader queue after all pathnames were enqueued, one per line.
pub fn execute(args: PrefetchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loader = Arc::new(QueueLoader::new());
    install_loader(loader.clone());

    for pathname in &args.pathnames {
        prefetch_pathname(pathname)?;
    }

    for pathname in loader.drain() {
        println!("{}", pathname);
    }

    Ok(())
}
