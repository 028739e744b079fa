//! Toolchain configuration merging
//!
//! Produces the final set of preprocessor definitions, compiler flags, and
//! linker flags for a build from a fixed base configuration plus the board
//! profile's capability flags. All collections append-if-absent, so merging
//! is idempotent and conditional overlays never duplicate entries.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::defaults::{ARDUINO_API_LEVEL, IDF_VERSION};
use crate::core::board::BoardProfile;

/// A preprocessor definition: name plus optional value
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Define {
    /// Macro name
    pub name: String,

    /// Macro value; `None` renders as a bare `-DNAME`
    pub value: Option<String>,
}

/// Merged toolchain configuration consumed by the external build driver
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Preprocessor definitions, unique by name
    pub defines: Vec<Define>,

    /// Header search paths
    pub include_dirs: Vec<PathBuf>,

    /// Flags applied to C compilation only
    pub c_flags: Vec<String>,

    /// Flags applied to C++ compilation only
    pub cxx_flags: Vec<String>,

    /// Flags applied to both C and C++ compilation
    pub common_flags: Vec<String>,

    /// Linker flags
    pub linker_flags: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, flag: &str) {
    if !list.iter().any(|f| f == flag) {
        list.push(flag.to_string());
    }
}

impl ToolchainConfig {
    /// Add a definition unless one with the same name is already present
    pub fn add_define(&mut self, name: &str, value: Option<&str>) {
        if self.defines.iter().any(|d| d.name == name) {
            return;
        }
        self.defines.push(Define {
            name: name.to_string(),
            value: value.map(str::to_string),
        });
    }

    /// Add a header search path unless already present
    pub fn add_include_dir(&mut self, dir: PathBuf) {
        if !self.include_dirs.contains(&dir) {
            self.include_dirs.push(dir);
        }
    }

    /// Add a C-only compiler flag
    pub fn add_c_flag(&mut self, flag: &str) {
        push_unique(&mut self.c_flags, flag);
    }

    /// Add a C++-only compiler flag
    pub fn add_cxx_flag(&mut self, flag: &str) {
        push_unique(&mut self.cxx_flags, flag);
    }

    /// Add a flag shared by C and C++ compilation
    pub fn add_common_flag(&mut self, flag: &str) {
        push_unique(&mut self.common_flags, flag);
    }

    /// Add a linker flag
    pub fn add_linker_flag(&mut self, flag: &str) {
        push_unique(&mut self.linker_flags, flag);
    }

    /// Whether a definition with the given name is present
    pub fn has_define(&self, name: &str) -> bool {
        self.defines.iter().any(|d| d.name == name)
    }

    /// Fixed base configuration for the ESP32-P4 RISC-V target:
    /// language standards, size optimization, warning policy, section
    /// garbage collection, and the memory layout symbols.
    pub fn esp32p4_base() -> Self {
        let mut config = Self::default();

        config.add_c_flag("-std=gnu17");

        for flag in ["-std=gnu++17", "-fno-rtti", "-fno-exceptions"] {
            config.add_cxx_flag(flag);
        }

        for flag in [
            "-Os",
            "-march=rv32imafc",
            "-mabi=ilp32f",
            "-ffunction-sections",
            "-fdata-sections",
            "-Wall",
            "-Wextra",
            "-Wno-unused-parameter",
            "-Wno-unused-function",
            "-Wno-unused-variable",
            "-Wno-deprecated-declarations",
            "-Wno-missing-field-initializers",
            "-Wno-sign-compare",
        ] {
            config.add_common_flag(flag);
        }

        for flag in [
            "-Os",
            "-march=rv32imafc",
            "-mabi=ilp32f",
            "-Wl,--gc-sections",
            "-Wl,--cref",
            "-Wl,--check-sections",
            "-Wl,--unresolved-symbols=report-all",
            "-Wl,--warn-common",
            "-Wl,--warn-section-align",
            "-Wl,--defsym=_start=0x42000000",
            "-Wl,--defsym=_heap_start=0x50000000",
        ] {
            config.add_linker_flag(flag);
        }

        config
    }
}

/// Merge the board profile's capabilities into a base configuration.
///
/// Target-fixed definitions (architecture identifiers, CPU frequency, API
/// level markers) are unconditional; the PSRAM definitions are an additive
/// overlay applied only when the board declares a PSRAM type. The caller
/// consumes the result; no compilation happens here.
pub fn merge_board_config(base: &ToolchainConfig, board: &BoardProfile) -> ToolchainConfig {
    let mut config = base.clone();

    config.add_define("ARDUINO_ARCH_ESP32", None);
    config.add_define("ESP32", None);
    config.add_define("ESP32P4", None);

    if let Some(variant) = board.variant_name() {
        config.add_define("ARDUINO_BOARD", Some(&format!("\"{}\"", variant.to_uppercase())));
    }

    config.add_define("F_CPU", Some(&format!("{}L", board.f_cpu)));
    config.add_define("ARDUINO", Some(&ARDUINO_API_LEVEL.to_string()));
    config.add_define("ESPFORGE_FRAMEWORK", Some("1"));
    config.add_define("__RISC_V__", None);

    // ESP-IDF integration markers
    config.add_define("ESP_PLATFORM", None);
    config.add_define("IDF_VER", Some(&format!("\"{IDF_VERSION}\"")));

    if board.has_psram() {
        config.add_define("BOARD_HAS_PSRAM", None);
        config.add_define("CONFIG_SPIRAM_SUPPORT", Some("1"));
        config.add_define("CONFIG_SPIRAM_USE_CAPS_ALLOC", Some("1"));
    }

    config
}

/// Header search paths for a framework checkout: core, HAL, libraries, and
/// the board-selected variant when configured.
pub fn framework_include_dirs(
    framework_dir: &Path,
    core: &str,
    variant: Option<&str>,
) -> Vec<PathBuf> {
    let core_dir = framework_dir.join("cores").join(core);

    let mut dirs = vec![
        core_dir.clone(),
        core_dir.join("hal"),
        framework_dir.join("libraries"),
    ];

    if let Some(variant) = variant {
        dirs.push(framework_dir.join("variants").join(variant));
    }

    dirs
}
