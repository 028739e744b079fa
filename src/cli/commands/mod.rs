//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod flash;
pub mod plan;
pub mod sources;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use crate::core::manifest::Manifest;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover framework source files and report build units
    Sources,

    /// Print the merged toolchain configuration for the configured board
    Config {
        /// Output in JSON format for scripting
        #[arg(long)]
        json: bool,
    },

    /// Build and display the flash plan without executing it
    Plan {
        /// Serial port (overrides the manifest)
        #[arg(short, long)]
        port: Option<String>,

        /// Baud rate (overrides the manifest)
        #[arg(short, long)]
        baud: Option<u32>,

        /// Chip identifier (overrides the board profile MCU)
        #[arg(long)]
        chip: Option<String>,

        /// Build environment name (overrides the manifest)
        #[arg(short, long)]
        environment: Option<String>,
    },

    /// Flash the built images to a device
    Flash {
        /// Serial port (overrides the manifest)
        #[arg(short, long)]
        port: Option<String>,

        /// Baud rate (overrides the manifest)
        #[arg(short, long)]
        baud: Option<u32>,

        /// Chip identifier (overrides the board profile MCU)
        #[arg(long)]
        chip: Option<String>,

        /// Build environment name (overrides the manifest)
        #[arg(short, long)]
        environment: Option<String>,

        /// Flashing tool executable (overrides the manifest)
        #[arg(long)]
        tool: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Commands {
    /// Run the command against the given manifest path
    pub fn run(self, manifest_path: &Path) -> Result<()> {
        match self {
            Self::Sources => sources::execute(manifest_path),
            Self::Config { json } => config::execute(manifest_path, json),
            Self::Plan {
                port,
                baud,
                chip,
                environment,
            } => plan::execute(manifest_path, port, baud, chip, environment),
            Self::Flash {
                port,
                baud,
                chip,
                environment,
                tool,
                yes,
            } => flash::execute(manifest_path, port, baud, chip, environment, tool, yes),
        }
    }
}

/// Load the manifest and derive the project root from its location
pub(crate) fn load_project(manifest_path: &Path) -> Result<(PathBuf, Manifest)> {
    let manifest = Manifest::load(manifest_path)
        .with_context(|| format!("Failed to load manifest: {}", manifest_path.display()))?;

    let project_root = manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    Ok((project_root, manifest))
}

/// Resolve the serial port from the CLI argument or the manifest
pub(crate) fn resolve_port(cli_port: Option<String>, manifest: &Manifest) -> Result<String> {
    match cli_port.or_else(|| manifest.upload.port.clone()) {
        Some(port) => Ok(port),
        None => bail!(
            "No serial port configured. Pass --port or set 'port' in the [upload] section."
        ),
    }
}

/// Build output directory for the configured environment
pub(crate) fn output_dir(project_root: &Path, manifest: &Manifest, environment: Option<&str>) -> PathBuf {
    let environment = environment.unwrap_or(&manifest.project.environment);
    project_root
        .join(&manifest.framework.build_dir)
        .join(environment)
}
