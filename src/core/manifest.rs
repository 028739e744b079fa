//! Manifest (espforge.toml) parsing and validation
//!
//! The manifest is the main configuration file for an espforge project. It
//! names the project and build environment, carries the board profile, and
//! configures upload parameters and the framework source layout.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::defaults::{
    DEFAULT_BAUD, DEFAULT_BUILD_DIR, DEFAULT_CORE_NAME, DEFAULT_ENVIRONMENT,
    DEFAULT_FLASH_TOOL, DEFAULT_FRAMEWORK_DIR,
};
use crate::core::board::BoardProfile;
use crate::error::ManifestError;

/// The main project manifest (espforge.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Project configuration
    pub project: ProjectConfig,

    /// Board capability profile
    #[serde(default)]
    pub board: BoardProfile,

    /// Upload configuration
    #[serde(default)]
    pub upload: UploadConfig,

    /// Framework source layout
    #[serde(default)]
    pub framework: FrameworkConfig,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Build environment name (subdirectory of the build output root)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Project description
    #[serde(default)]
    pub description: Option<String>,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

/// Upload configuration in the manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Serial port (overridable on the command line)
    #[serde(default)]
    pub port: Option<String>,

    /// Baud rate
    #[serde(default = "default_baud")]
    pub baud: u32,

    /// External flashing tool executable
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Flash mode override (takes precedence over the board profile)
    #[serde(default)]
    pub flash_mode: Option<String>,

    /// Flash frequency override
    #[serde(default)]
    pub flash_freq: Option<String>,

    /// Flash size override
    #[serde(default)]
    pub flash_size: Option<String>,

    /// Additional images flashed after the chip-defined ones
    #[serde(default)]
    pub extra: Vec<ExtraImage>,
}

fn default_baud() -> u32 {
    DEFAULT_BAUD
}

fn default_tool() -> String {
    DEFAULT_FLASH_TOOL.to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: default_baud(),
            tool: default_tool(),
            flash_mode: None,
            flash_freq: None,
            flash_size: None,
            extra: Vec::new(),
        }
    }
}

/// An additional flash image declared in the manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtraImage {
    /// Flash offset, hex ("0x110000") or decimal
    pub offset: String,

    /// Image path relative to the build output directory
    pub path: String,
}

/// Framework source layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameworkConfig {
    /// Framework root directory, relative to the project root
    #[serde(default = "default_framework_dir")]
    pub dir: String,

    /// Core name under `cores/`
    #[serde(default = "default_core_name")]
    pub core: String,

    /// Build output root, relative to the project root
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
}

fn default_framework_dir() -> String {
    DEFAULT_FRAMEWORK_DIR.to_string()
}

fn default_core_name() -> String {
    DEFAULT_CORE_NAME.to_string()
}

fn default_build_dir() -> String {
    DEFAULT_BUILD_DIR.to_string()
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            dir: default_framework_dir(),
            core: default_core_name(),
            build_dir: default_build_dir(),
        }
    }
}

impl Manifest {
    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load the manifest from a file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================
    // Unit Tests - manifest parsing
    // ============================================

    #[test]
    fn test_manifest_parses_correctly() {
        let toml_content = r#"
[project]
name = "tab5-demo"
environment = "release"

[board]
mcu = "esp32p4"
variant = "m5tab5"
f_cpu = 400000000
psram_type = "hex"

[upload]
port = "/dev/ttyACM0"
baud = 921600
flash_mode = "qio"

[[upload.extra]]
offset = "0x110000"
path = "assets.bin"

[framework]
dir = "framework"
core = "tab5"
"#;

        let manifest = Manifest::from_toml(toml_content).expect("Failed to parse valid manifest");

        assert_eq!(manifest.project.name, "tab5-demo");
        assert_eq!(manifest.project.environment, "release");
        assert_eq!(manifest.board.mcu, "esp32p4");
        assert_eq!(manifest.board.variant_name(), Some("m5tab5"));
        assert_eq!(manifest.upload.port, Some("/dev/ttyACM0".to_string()));
        assert_eq!(manifest.upload.baud, 921_600);
        assert_eq!(manifest.upload.flash_mode, Some("qio".to_string()));
        assert_eq!(manifest.upload.extra.len(), 1);
        assert_eq!(manifest.upload.extra[0].offset, "0x110000");
        assert_eq!(manifest.framework.core, "tab5");
        assert_eq!(manifest.framework.build_dir, DEFAULT_BUILD_DIR);
    }

    #[test]
    fn test_minimal_manifest_parses() {
        let toml_content = r#"
[project]
name = "minimal"
"#;

        let manifest = Manifest::from_toml(toml_content).expect("Failed to parse minimal manifest");

        assert_eq!(manifest.project.name, "minimal");
        assert_eq!(manifest.project.environment, DEFAULT_ENVIRONMENT);
        assert_eq!(manifest.board, BoardProfile::default());
        assert_eq!(manifest.upload.baud, DEFAULT_BAUD);
        assert_eq!(manifest.upload.tool, DEFAULT_FLASH_TOOL);
        assert!(manifest.upload.extra.is_empty());
        assert_eq!(manifest.framework.dir, DEFAULT_FRAMEWORK_DIR);
    }

    #[test]
    fn test_missing_project_name_fails() {
        let toml_content = r#"
[project]
environment = "dev"
"#;

        let result = Manifest::from_toml(toml_content);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(
            err.contains("name") || err.contains("missing"),
            "Error should mention missing 'name': {err}"
        );
    }

    #[test]
    fn test_manifest_roundtrip() {
        let toml_content = r#"
[project]
name = "roundtrip"

[board]
variant = "m5tab5"
psram_type = "hex"

[upload]
port = "/dev/ttyUSB0"
"#;

        let manifest = Manifest::from_toml(toml_content).expect("Failed to parse");
        let serialized = manifest.to_toml().expect("Failed to serialize");
        let parsed = Manifest::from_toml(&serialized).expect("Failed to parse back");

        assert_eq!(manifest, parsed);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = Manifest::load(&dir.path().join("espforge.toml"));

        assert!(matches!(result, Err(ManifestError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("espforge.toml");
        std::fs::write(&path, "[project]\nname = \"loaded\"\n").expect("Failed to write manifest");

        let manifest = Manifest::load(&path).expect("Failed to load manifest");
        assert_eq!(manifest.project.name, "loaded");
    }
}
