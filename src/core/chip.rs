//! Chip profiles and flash offset tables
//!
//! Flash offsets are a property of a chip's boot ROM and partition layout,
//! not something configurable per invocation. Each supported chip registers
//! a profile here; a chip identifier (or one of its aliases) selects the
//! profile used for flash planning.

use std::fmt;

use crate::error::FlashPlanError;

/// Role of a flash image within a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageRole {
    /// Second-stage bootloader
    Bootloader,
    /// Partition table
    PartitionTable,
    /// Application firmware
    Application,
    /// Additional image (filesystem, assets) from the manifest
    Other,
}

impl ImageRole {
    /// Conventional artifact file name inside the build output directory.
    ///
    /// `Other` images carry their own paths, so they have no fixed name.
    pub fn artifact_name(self) -> Option<&'static str> {
        match self {
            Self::Bootloader => Some("bootloader.bin"),
            Self::PartitionTable => Some("partitions.bin"),
            Self::Application => Some("firmware.bin"),
            Self::Other => None,
        }
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bootloader => "bootloader",
            Self::PartitionTable => "partition-table",
            Self::Application => "application",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// Static per-chip flashing profile
#[derive(Debug)]
pub struct ChipProfile {
    /// Canonical chip identifier passed to the flashing tool
    pub id: &'static str,

    /// Short identifiers accepted in configuration
    pub aliases: &'static [&'static str],

    /// Human-readable chip name
    pub name: &'static str,

    /// Required image roles and their fixed flash offsets, ascending
    pub images: &'static [(ImageRole, u32)],

    /// Flash mode used when neither board nor override specifies one
    pub default_flash_mode: &'static str,

    /// Flash frequency used when neither board nor override specifies one
    pub default_flash_freq: &'static str,
}

/// Registered chip profiles
pub static CHIP_PROFILES: &[ChipProfile] = &[
    ChipProfile {
        id: "esp32p4",
        aliases: &["p4"],
        name: "ESP32-P4",
        images: &[
            (ImageRole::Bootloader, 0x0000),
            (ImageRole::PartitionTable, 0x8000),
            (ImageRole::Application, 0x1_0000),
        ],
        default_flash_mode: "qio",
        default_flash_freq: "80m",
    },
    ChipProfile {
        id: "esp32s3",
        aliases: &["s3"],
        name: "ESP32-S3",
        images: &[
            (ImageRole::Bootloader, 0x0000),
            (ImageRole::PartitionTable, 0x8000),
            (ImageRole::Application, 0x1_0000),
        ],
        default_flash_mode: "dio",
        default_flash_freq: "80m",
    },
    ChipProfile {
        id: "esp32",
        aliases: &[],
        name: "ESP32",
        images: &[
            (ImageRole::Bootloader, 0x1000),
            (ImageRole::PartitionTable, 0x8000),
            (ImageRole::Application, 0x1_0000),
        ],
        default_flash_mode: "dio",
        default_flash_freq: "40m",
    },
];

/// Look up a chip profile by canonical id or alias
pub fn chip_profile(id: &str) -> Option<&'static ChipProfile> {
    CHIP_PROFILES
        .iter()
        .find(|p| p.id == id || p.aliases.contains(&id))
}

/// Canonical ids of all registered chips
pub fn known_chip_ids() -> Vec<String> {
    CHIP_PROFILES.iter().map(|p| p.id.to_string()).collect()
}

/// Parse a flash offset from configuration: hex with `0x` prefix or decimal
pub fn parse_offset(value: &str) -> Result<u32, FlashPlanError> {
    let trimmed = value.trim();

    let parsed = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        trimmed.parse()
    };

    parsed.map_err(|_| FlashPlanError::BadOffset {
        value: value.to_string(),
    })
}
