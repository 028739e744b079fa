//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create an executable script in the test project
    #[cfg(unix)]
    pub fn create_script(&self, name: &str, content: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.create_file(name, content);
        let path = self.dir.path().join(name);
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat script")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to make script executable");
    }

    /// Create the standard flash artifacts for the given environment
    pub fn create_artifacts(&self, environment: &str) {
        for artifact in ["bootloader.bin", "partitions.bin", "firmware.bin"] {
            self.create_file(&format!(".build/{environment}/{artifact}"), "binary");
        }
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample manifest TOML for testing
#[allow(dead_code)]
pub const SAMPLE_MANIFEST: &str = r#"
[project]
name = "test-project"
environment = "default"

[board]
mcu = "esp32p4"
variant = "m5tab5"
f_cpu = 400000000
flash_size = "16MB"

[upload]
port = "/dev/ttyACM1"
baud = 460800
"#;

/// Sample manifest with PSRAM declared
#[allow(dead_code)]
pub const SAMPLE_MANIFEST_PSRAM: &str = r#"
[project]
name = "test-project"

[board]
mcu = "esp32p4"
variant = "m5tab5"
psram_type = "hex"
psram_size = "32MB"

[upload]
port = "/dev/ttyACM1"
"#;
