//! Flash plan construction
//!
//! Validates that every binary the chip requires exists in the build output
//! directory and assembles an ordered, offset-addressed plan plus connection
//! parameters. A plan is built fresh immediately before each upload attempt
//! and discarded afterward; ports and binaries may change between attempts.

use std::path::{Path, PathBuf};

use crate::core::board::BoardProfile;
use crate::core::chip::{chip_profile, known_chip_ids, parse_offset, ChipProfile, ImageRole};
use crate::core::manifest::ExtraImage;
use crate::error::FlashPlanError;

/// Serial connection parameters, treated as opaque strings beyond presence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Serial port device (e.g. "/dev/ttyACM1")
    pub port: String,

    /// Baud rate
    pub baud: u32,
}

/// One binary artifact at a fixed flash offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashImage {
    /// Memory offset the image is written to
    pub offset: u32,

    /// Role of the image within the plan
    pub role: ImageRole,

    /// Path to the artifact, confirmed to exist at plan-construction time
    pub path: PathBuf,
}

/// A fully resolved upload: images ascending by offset plus connection and
/// flash parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashPlan {
    /// Canonical chip identifier for the flashing tool
    pub chip: &'static str,

    /// Serial connection parameters
    pub connection: ConnectionParams,

    /// Flash mode (e.g. "qio")
    pub flash_mode: String,

    /// Flash frequency (e.g. "80m")
    pub flash_freq: String,

    /// Flash size (e.g. "16MB")
    pub flash_size: String,

    /// Images in ascending offset order, offsets unique
    pub images: Vec<FlashImage>,
}

/// Explicit flash parameter overrides; each takes precedence over the board
/// profile and the chip default
#[derive(Debug, Clone, Default)]
pub struct FlashOverrides {
    /// Flash mode override
    pub mode: Option<String>,

    /// Flash frequency override
    pub freq: Option<String>,

    /// Flash size override
    pub size: Option<String>,
}

/// Builds a [`FlashPlan`] from a build output directory and a chip profile
#[derive(Debug)]
pub struct FlashPlanBuilder<'a> {
    output_dir: PathBuf,
    chip_id: String,
    connection: ConnectionParams,
    board: &'a BoardProfile,
    overrides: FlashOverrides,
    extra: Vec<ExtraImage>,
}

impl<'a> FlashPlanBuilder<'a> {
    /// Create a builder for one upload attempt
    pub fn new(
        output_dir: &Path,
        chip_id: &str,
        connection: ConnectionParams,
        board: &'a BoardProfile,
    ) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            chip_id: chip_id.to_string(),
            connection,
            board,
            overrides: FlashOverrides::default(),
            extra: Vec::new(),
        }
    }

    /// Apply explicit flash parameter overrides
    #[must_use]
    pub fn with_overrides(mut self, overrides: FlashOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Add manifest-declared extra images, resolved relative to the output
    /// directory
    #[must_use]
    pub fn with_extra_images(mut self, extra: &[ExtraImage]) -> Self {
        self.extra.extend_from_slice(extra);
        self
    }

    /// Validate artifacts and construct the plan.
    ///
    /// Fails with the complete list of missing artifacts; a partial plan is
    /// never returned. On success every referenced artifact existed at
    /// construction time (a later deletion is a race the orchestrator still
    /// surfaces as a tool failure at execution time).
    pub fn build(self) -> Result<FlashPlan, FlashPlanError> {
        let profile = self.chip()?;

        let mut images = Vec::new();
        for (role, offset) in profile.images {
            // Chip-required roles always carry a fixed artifact name
            let name = role
                .artifact_name()
                .expect("chip profile images have artifact names");
            images.push(FlashImage {
                offset: *offset,
                role: *role,
                path: self.output_dir.join(name),
            });
        }

        for extra in &self.extra {
            images.push(FlashImage {
                offset: parse_offset(&extra.offset)?,
                role: ImageRole::Other,
                path: self.output_dir.join(&extra.path),
            });
        }

        let missing: Vec<PathBuf> = images
            .iter()
            .filter(|image| !image.path.exists())
            .map(|image| image.path.clone())
            .collect();
        if !missing.is_empty() {
            return Err(FlashPlanError::MissingArtifacts { missing });
        }

        images.sort_by_key(|image| image.offset);
        for pair in images.windows(2) {
            if pair[0].offset == pair[1].offset {
                return Err(FlashPlanError::DuplicateOffset {
                    offset: pair[1].offset,
                    path: pair[1].path.clone(),
                });
            }
        }

        let flash_mode =
            resolve_setting(&self.overrides.mode, &self.board.flash_mode, profile.default_flash_mode);
        let flash_freq =
            resolve_setting(&self.overrides.freq, &self.board.flash_freq, profile.default_flash_freq);
        let flash_size = self
            .overrides
            .size
            .clone()
            .unwrap_or_else(|| self.board.flash_size.clone());

        Ok(FlashPlan {
            chip: profile.id,
            connection: self.connection,
            flash_mode,
            flash_freq,
            flash_size,
            images,
        })
    }

    fn chip(&self) -> Result<&'static ChipProfile, FlashPlanError> {
        chip_profile(&self.chip_id).ok_or_else(|| FlashPlanError::UnknownChip {
            id: self.chip_id.clone(),
            known: known_chip_ids(),
        })
    }
}

/// Override takes precedence over the board profile, which takes precedence
/// over the chip default
fn resolve_setting(overridden: &Option<String>, board: &Option<String>, chip_default: &str) -> String {
    overridden
        .clone()
        .or_else(|| board.clone())
        .unwrap_or_else(|| chip_default.to_string())
}
