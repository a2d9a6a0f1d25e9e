pub mod prefetch;
pub mod render;
pub mod resolve;

use pagequery_core::{DataSnapshot, Result};
use std::path::Path;
use std::sync::Arc;

/// Load a snapshot file, or an empty snapshot when no path is given
pub fn load_snapshot(path: Option<&Path>) -> Result<Arc<DataSnapshot>> {
    let snapshot = match path {
        Some(path) => DataSnapshot::load(path)?,
        None => DataSnapshot::new(),
    };
    Ok(Arc::new(snapshot))
}

/// Write `text` to `output`, or stdout when no path is given
pub fn write_output(output: Option<&Path>, text: &str) -> std::io::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
