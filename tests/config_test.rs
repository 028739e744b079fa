//! Integration tests for `espforge config`
//!
//! - Prints the merged toolchain configuration
//! - Applies the PSRAM overlay only when the board declares PSRAM
//! - Emits machine-readable JSON with --json

mod common;

use common::{TestProject, SAMPLE_MANIFEST, SAMPLE_MANIFEST_PSRAM};
use std::process::Command;

/// Helper to run espforge config
fn run_config(project: &TestProject, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_espforge"));
    cmd.current_dir(project.path());
    cmd.arg("config");
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute espforge config")
}

#[test]
fn test_config_prints_target_defines() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST);

    let output = run_config(&project, &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-DARDUINO_ARCH_ESP32"));
    assert!(stdout.contains("-DESP32P4"));
    assert!(stdout.contains("-DF_CPU=400000000L"));
    assert!(stdout.contains("-DARDUINO_BOARD=\"M5TAB5\""));
    assert!(stdout.contains("-march=rv32imafc"));
}

#[test]
fn test_config_without_psram_has_no_spiram_defines() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST);

    let output = run_config(&project, &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PSRAM: disabled"));
    assert!(!stdout.contains("BOARD_HAS_PSRAM"));
    assert!(!stdout.contains("CONFIG_SPIRAM_SUPPORT"));
}

#[test]
fn test_config_with_psram_applies_overlay() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST_PSRAM);

    let output = run_config(&project, &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PSRAM: enabled"));
    assert!(stdout.contains("-DBOARD_HAS_PSRAM"));
    assert!(stdout.contains("-DCONFIG_SPIRAM_SUPPORT=1"));
    assert!(stdout.contains("-DCONFIG_SPIRAM_USE_CAPS_ALLOC=1"));
}

#[test]
fn test_config_json_is_machine_readable() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST_PSRAM);

    let output = run_config(&project, &["--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("--json output should be valid JSON");

    let defines = parsed["defines"]
        .as_array()
        .expect("defines should be an array");
    assert!(defines
        .iter()
        .any(|d| d["name"] == "BOARD_HAS_PSRAM"));

    let common_flags = parsed["common_flags"]
        .as_array()
        .expect("common_flags should be an array");
    assert!(common_flags.iter().any(|f| f == "-Os"));
}
