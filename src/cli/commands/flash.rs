//! CLI command implementation for `espforge flash`
//!
//! Builds a fresh flash plan, asks for confirmation, and executes the
//! upload through the external flashing tool. The tool's exit code is
//! surfaced unchanged on failure; a distinct fixed code signals that the
//! tool itself could not be found, so calling scripts can branch on the
//! remediation type.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{bail, Result};

use super::{load_project, plan::build_plan};
use crate::cli::output::{create_spinner, status};
use crate::config::defaults::TOOL_NOT_FOUND_EXIT_CODE;
use crate::core::plan::FlashPlan;
use crate::core::upload::{UploadOrchestrator, UploadOutcome};

/// Execute the flash command
#[allow(clippy::too_many_arguments)]
pub fn execute(
    manifest_path: &Path,
    port: Option<String>,
    baud: Option<u32>,
    chip: Option<String>,
    environment: Option<String>,
    tool: Option<String>,
    yes: bool,
) -> Result<()> {
    let (project_root, manifest) = load_project(manifest_path)?;

    let tool = tool.unwrap_or_else(|| manifest.upload.tool.clone());
    let plan = build_plan(&project_root, &manifest, port, baud, chip, environment.as_deref())?;

    if which::which(&tool).is_err() {
        eprintln!(
            "{} Flashing tool '{tool}' is not installed or not in PATH.\n\
             Please install it before flashing.",
            status::ERROR
        );
        std::process::exit(TOOL_NOT_FOUND_EXIT_CODE);
    }

    if !yes {
        require_confirmation(&plan)?;
    }

    let spinner = create_spinner(&format!(
        "Writing {} images to {}...",
        plan.images.len(),
        plan.connection.port
    ));

    let orchestrator = UploadOrchestrator::new(&tool);
    let result = orchestrator.upload(&plan);
    spinner.finish_and_clear();

    match result.outcome {
        UploadOutcome::Success => {
            println!("{} Flash completed successfully.", status::SUCCESS);
            if !result.stdout.is_empty() {
                println!("{}", result.stdout);
            }
            Ok(())
        }
        UploadOutcome::Failed { exit_code } => {
            eprintln!("{} Flash failed (exit code {exit_code}).", status::ERROR);
            if !result.stderr.is_empty() {
                eprintln!("{}", result.stderr);
            }
            std::process::exit(result.exit_code());
        }
        UploadOutcome::ToolNotFound => {
            eprintln!(
                "{} Flashing tool '{tool}' could not be started: {}",
                status::ERROR,
                result.stderr
            );
            std::process::exit(result.exit_code());
        }
    }
}

/// Require user confirmation before touching hardware
fn require_confirmation(plan: &FlashPlan) -> Result<()> {
    eprintln!();
    eprintln!(
        "{} WARNING: This will flash {} images to {}!",
        status::WARNING,
        plan.images.len(),
        plan.connection.port
    );
    eprintln!("   Interrupting a write can leave the device unbootable.");
    eprintln!();
    eprint!("   Are you sure you want to continue? [y/N] ");
    io::stderr().flush()?;

    // In non-interactive mode (no TTY), fail
    if !io::stdin().is_terminal() {
        bail!(
            "Cannot prompt for confirmation in non-interactive mode.\n\
             Use --yes to skip confirmation."
        );
    }

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    if input != "y" && input != "yes" {
        bail!("Flash cancelled by user.");
    }

    Ok(())
}
