//! Board/variant capability profiles
//!
//! A board profile describes one hardware target: MCU, clocking, flash and
//! PSRAM capabilities, and the variant whose pin mapping the framework
//! compiles in. Profiles are constructed once from the manifest and are
//! read-only afterward.

use serde::{Deserialize, Serialize};

use crate::config::defaults::{DEFAULT_F_CPU, DEFAULT_FLASH_SIZE};

/// Capability record for a hardware target.
///
/// Board metadata may be partially specified during early bring-up, so every
/// field that can sensibly default does: 400 MHz CPU, 16MB flash, no PSRAM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardProfile {
    /// MCU identifier (chip profile key, e.g. "esp32p4")
    #[serde(default = "default_mcu")]
    pub mcu: String,

    /// Variant name (pin mapping under `variants/`)
    #[serde(default)]
    pub variant: Option<String>,

    /// CPU frequency in Hz
    #[serde(default = "default_f_cpu")]
    pub f_cpu: u32,

    /// Flash size (esptool notation, e.g. "16MB")
    #[serde(default = "default_flash_size")]
    pub flash_size: String,

    /// PSRAM type, absent when the board has no PSRAM
    #[serde(default)]
    pub psram_type: Option<String>,

    /// PSRAM size, informational
    #[serde(default)]
    pub psram_size: Option<String>,

    /// Flash mode override (e.g. "qio"); chip default applies when absent
    #[serde(default)]
    pub flash_mode: Option<String>,

    /// Flash frequency override (e.g. "80m"); chip default applies when absent
    #[serde(default)]
    pub flash_freq: Option<String>,
}

fn default_mcu() -> String {
    "esp32p4".to_string()
}

fn default_f_cpu() -> u32 {
    DEFAULT_F_CPU
}

fn default_flash_size() -> String {
    DEFAULT_FLASH_SIZE.to_string()
}

impl Default for BoardProfile {
    fn default() -> Self {
        Self {
            mcu: default_mcu(),
            variant: None,
            f_cpu: default_f_cpu(),
            flash_size: default_flash_size(),
            psram_type: None,
            psram_size: None,
            flash_mode: None,
            flash_freq: None,
        }
    }
}

impl BoardProfile {
    /// Whether the board declares PSRAM.
    ///
    /// An empty `psram_type` string counts as absent, so a hand-edited
    /// manifest with `psram_type = ""` behaves like a missing key.
    pub fn has_psram(&self) -> bool {
        self.psram_type.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Variant name, with empty strings treated as absent
    pub fn variant_name(&self) -> Option<&str> {
        self.variant.as_deref().filter(|v| !v.is_empty())
    }

    /// CPU frequency in MHz, for display
    pub fn f_cpu_mhz(&self) -> u32 {
        self.f_cpu / 1_000_000
    }
}
