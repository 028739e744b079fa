//! CLI command implementation for `espforge plan`

use std::path::Path;

use anyhow::Result;

use super::{load_project, output_dir, resolve_port};
use crate::core::plan::{ConnectionParams, FlashOverrides, FlashPlan, FlashPlanBuilder};

/// Execute the plan command
pub fn execute(
    manifest_path: &Path,
    port: Option<String>,
    baud: Option<u32>,
    chip: Option<String>,
    environment: Option<String>,
) -> Result<()> {
    let (project_root, manifest) = load_project(manifest_path)?;

    let plan = build_plan(&project_root, &manifest, port, baud, chip, environment.as_deref())?;
    print_plan(&plan);

    Ok(())
}

/// Construct a flash plan from the manifest plus CLI overrides.
///
/// Shared with the flash command so both resolve parameters identically.
pub(crate) fn build_plan(
    project_root: &Path,
    manifest: &crate::core::manifest::Manifest,
    port: Option<String>,
    baud: Option<u32>,
    chip: Option<String>,
    environment: Option<&str>,
) -> Result<FlashPlan> {
    let connection = ConnectionParams {
        port: resolve_port(port, manifest)?,
        baud: baud.unwrap_or(manifest.upload.baud),
    };

    let chip_id = chip.unwrap_or_else(|| manifest.board.mcu.clone());
    let artifacts = output_dir(project_root, manifest, environment);

    let plan = FlashPlanBuilder::new(&artifacts, &chip_id, connection, &manifest.board)
        .with_overrides(FlashOverrides {
            mode: manifest.upload.flash_mode.clone(),
            freq: manifest.upload.flash_freq.clone(),
            size: manifest.upload.flash_size.clone(),
        })
        .with_extra_images(&manifest.upload.extra)
        .build()?;

    Ok(plan)
}

/// Display a flash plan
pub(crate) fn print_plan(plan: &FlashPlan) {
    println!("Flash plan for chip '{}':", plan.chip);
    println!(
        "  Port: {} @ {} baud",
        plan.connection.port, plan.connection.baud
    );
    println!(
        "  Flash: mode={} freq={} size={}",
        plan.flash_mode, plan.flash_freq, plan.flash_size
    );
    println!("  Images:");
    for image in &plan.images {
        println!(
            "    {:#08x}  {:<15}  {}",
            image.offset,
            image.role.to_string(),
            image.path.display()
        );
    }
}
