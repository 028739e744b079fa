//! Integration tests for `espforge plan`
//!
//! - Displays the ordered flash plan when all artifacts are present
//! - Fails with the complete missing-artifact list otherwise
//! - Honors CLI overrides for port and chip

mod common;

use common::{TestProject, SAMPLE_MANIFEST};
use predicates::prelude::*;
use std::process::Command;

/// Helper to run espforge plan
fn run_plan(project: &TestProject, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_espforge"));
    cmd.current_dir(project.path());
    cmd.arg("plan");
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute espforge plan")
}

#[test]
fn test_plan_shows_images_in_offset_order() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST);
    project.create_artifacts("default");

    let output = run_plan(&project, &[]);
    assert!(
        output.status.success(),
        "plan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Flash plan for chip 'esp32p4'"));
    assert!(stdout.contains("/dev/ttyACM1 @ 460800 baud"));

    let bootloader = stdout.find("bootloader.bin").expect("bootloader listed");
    let partitions = stdout.find("partitions.bin").expect("partitions listed");
    let firmware = stdout.find("firmware.bin").expect("firmware listed");
    assert!(bootloader < partitions && partitions < firmware);

    assert!(predicate::str::contains("0x008000").eval(&stdout));
    assert!(predicate::str::contains("0x010000").eval(&stdout));
}

#[test]
fn test_plan_lists_every_missing_artifact() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST);
    // Only the application image exists
    project.create_file(".build/default/firmware.bin", "binary");

    let output = run_plan(&project, &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bootloader.bin"));
    assert!(stderr.contains("partitions.bin"));
    assert!(!stderr.contains("firmware.bin"));
}

#[test]
fn test_plan_accepts_chip_alias_override() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST);
    project.create_artifacts("default");

    let output = run_plan(&project, &["--chip", "p4"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Flash plan for chip 'esp32p4'"));
}

#[test]
fn test_plan_rejects_unknown_chip() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST);
    project.create_artifacts("default");

    let output = run_plan(&project, &["--chip", "esp99"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown chip 'esp99'"));
    assert!(stderr.contains("esp32p4"));
}

#[test]
fn test_plan_requires_a_port() {
    let project = TestProject::new();
    project.create_file(
        "espforge.toml",
        "[project]\nname = \"no-port\"\n\n[board]\nmcu = \"esp32p4\"\n",
    );
    project.create_artifacts("default");

    let output = run_plan(&project, &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No serial port configured"));
}

#[test]
fn test_plan_port_override_wins() {
    let project = TestProject::new();
    project.create_file("espforge.toml", SAMPLE_MANIFEST);
    project.create_artifacts("default");

    let output = run_plan(&project, &["--port", "/dev/ttyUSB7", "--baud", "921600"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/dev/ttyUSB7 @ 921600 baud"));
}
