//! CLI command implementation for `espforge sources`

use std::path::Path;

use anyhow::Result;

use super::load_project;
use crate::cli::output::status;
use crate::core::units::framework_units;

/// Execute the sources command
pub fn execute(manifest_path: &Path) -> Result<()> {
    let (project_root, manifest) = load_project(manifest_path)?;

    let units = framework_units(&project_root, &manifest);

    if units.is_empty() {
        println!(
            "{} No build units discovered under {}",
            status::WARNING,
            project_root.join(&manifest.framework.dir).display()
        );
        return Ok(());
    }

    println!("Build units for '{}':", manifest.project.name);
    for unit in &units {
        println!("  {} {}: {} source files", status::SUCCESS, unit.name, unit.sources.len());
    }

    Ok(())
}
