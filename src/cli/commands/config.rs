//! CLI command implementation for `espforge config`

use std::path::Path;

use anyhow::{Context, Result};

use super::load_project;
use crate::core::toolchain::{framework_include_dirs, merge_board_config, ToolchainConfig};

/// Execute the config command
pub fn execute(manifest_path: &Path, json: bool) -> Result<()> {
    let (project_root, manifest) = load_project(manifest_path)?;

    let base = ToolchainConfig::esp32p4_base();
    let mut merged = merge_board_config(&base, &manifest.board);

    let framework_dir = project_root.join(&manifest.framework.dir);
    for dir in framework_include_dirs(
        &framework_dir,
        &manifest.framework.core,
        manifest.board.variant_name(),
    ) {
        merged.add_include_dir(dir);
    }

    if json {
        let rendered =
            serde_json::to_string_pretty(&merged).context("Failed to serialize configuration")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Toolchain configuration for '{}':", manifest.project.name);
    println!("  MCU: {}", manifest.board.mcu);
    println!("  CPU frequency: {} MHz", manifest.board.f_cpu_mhz());
    println!("  Flash size: {}", manifest.board.flash_size);
    if manifest.board.has_psram() {
        let size = manifest.board.psram_size.as_deref().unwrap_or("unknown size");
        println!(
            "  PSRAM: enabled ({}, {})",
            manifest.board.psram_type.as_deref().unwrap_or_default(),
            size
        );
    } else {
        println!("  PSRAM: disabled");
    }

    println!("\nDefines:");
    for define in &merged.defines {
        match &define.value {
            Some(value) => println!("  -D{}={}", define.name, value),
            None => println!("  -D{}", define.name),
        }
    }

    println!("\nInclude directories:");
    for dir in &merged.include_dirs {
        println!("  -I{}", dir.display());
    }

    for (label, flags) in [
        ("C flags", &merged.c_flags),
        ("C++ flags", &merged.cxx_flags),
        ("Common flags", &merged.common_flags),
        ("Linker flags", &merged.linker_flags),
    ] {
        println!("\n{label}:");
        for flag in flags {
            println!("  {flag}");
        }
    }

    Ok(())
}
