//! Error types for espforge
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest (espforge.toml) errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("Manifest not found at '{path}'. Create an espforge.toml to describe the project.")]
    NotFound { path: PathBuf },

    /// IO error reading the manifest
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },

    /// Manifest parse error
    #[error("Failed to parse manifest: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
}

/// Flash plan construction errors
#[derive(Error, Debug)]
pub enum FlashPlanError {
    /// Chip identifier not present in the chip profile table
    #[error("Unknown chip '{id}'. Known chips: {}", known.join(", "))]
    UnknownChip { id: String, known: Vec<String> },

    /// One or more required binaries are absent from the output directory
    #[error("Missing required flash artifacts:\n{}", format_missing(missing))]
    MissingArtifacts { missing: Vec<PathBuf> },

    /// Two images resolved to the same flash offset
    #[error("Flash offset {offset:#x} is assigned twice (second image: {path})")]
    DuplicateOffset { offset: u32, path: PathBuf },

    /// Malformed offset value in an extra-image entry
    #[error("Invalid flash offset '{value}': expected a hex (0x...) or decimal address")]
    BadOffset { value: String },
}

fn format_missing(missing: &[PathBuf]) -> String {
    missing
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifacts_lists_every_path() {
        let err = FlashPlanError::MissingArtifacts {
            missing: vec![
                PathBuf::from("/out/bootloader.bin"),
                PathBuf::from("/out/partitions.bin"),
            ],
        };

        let message = err.to_string();
        assert!(message.contains("/out/bootloader.bin"));
        assert!(message.contains("/out/partitions.bin"));
    }

    #[test]
    fn test_unknown_chip_names_alternatives() {
        let err = FlashPlanError::UnknownChip {
            id: "esp99".to_string(),
            known: vec!["esp32".to_string(), "esp32p4".to_string()],
        };

        let message = err.to_string();
        assert!(message.contains("esp99"));
        assert!(message.contains("esp32p4"));
    }
}
