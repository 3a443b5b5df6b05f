//! Dump command implementation.

use std::path::Path;

use anyhow::Result;
use i7_core::MemorySnapshot;

use crate::App;

/// Write the captured savemap (and palette) to disk for offline `decode`
pub fn run(app: &App, output: &Path, colors: Option<&Path>) -> Result<()> {
    let snapshot = MemorySnapshot::capture(&app.memory, app.process())?;

    std::fs::write(output, &snapshot.map)?;
    println!(
        "Savemap ({} bytes) saved to: {}",
        snapshot.map.len(),
        output.display()
    );

    if let Some(path) = colors {
        std::fs::write(path, &snapshot.colors)?;
        println!("Menu palette saved to: {}", path.display());
    }

    if !snapshot.decode().is_valid() {
        println!("Warning: the captured savemap failed the consistency check");
    }
    Ok(())
}
