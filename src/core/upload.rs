//! Upload orchestration
//!
//! Turns a flash plan into the external tool's invocation arguments, runs
//! the tool as a separate process, and translates the outcome into a
//! structured result. The call blocks until the subprocess terminates:
//! flashing is inherently sequential and the serial port is exclusively
//! owned for the duration of one invocation.
//!
//! No retries happen here. A flashing operation touches physical hardware
//! state and a silent retry could corrupt a partially-written image; retry
//! policy belongs to the caller.

use std::process::{Command, Output};

use crate::config::defaults::TOOL_NOT_FOUND_EXIT_CODE;
use crate::core::plan::FlashPlan;

/// Seam for subprocess execution, stubbed in tests
pub trait ProcessRunner {
    /// Run the program to completion, capturing output
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output>;
}

/// Runs subprocesses via [`std::process::Command`]
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output> {
        Command::new(program).args(args).output()
    }
}

/// Outcome of one upload invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Tool completed with exit status zero
    Success,

    /// Tool ran but exited non-zero
    Failed {
        /// The tool's exit code (-1 when terminated by a signal)
        exit_code: i32,
    },

    /// Tool executable could not be located or started. Distinguished from
    /// a tool-reported failure because the remediation differs: install the
    /// tool rather than debug the hardware or configuration.
    ToolNotFound,
}

/// Structured result of one upload invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Outcome classification
    pub outcome: UploadOutcome,

    /// Captured standard output, retained for diagnostics
    pub stdout: String,

    /// Captured standard error, never swallowed
    pub stderr: String,
}

impl UploadResult {
    /// Whether the upload completed successfully
    pub fn is_success(&self) -> bool {
        self.outcome == UploadOutcome::Success
    }

    /// Process exit code to surface to calling scripts: the tool's own code
    /// on failure, a fixed distinct code when the tool was not found.
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            UploadOutcome::Success => 0,
            UploadOutcome::Failed { exit_code } => exit_code,
            UploadOutcome::ToolNotFound => TOOL_NOT_FOUND_EXIT_CODE,
        }
    }
}

/// Executes a flash plan against the external flashing tool
#[derive(Debug)]
pub struct UploadOrchestrator<R = SystemRunner> {
    tool: String,
    runner: R,
}

impl UploadOrchestrator<SystemRunner> {
    /// Create an orchestrator invoking the given tool executable
    pub fn new(tool: &str) -> Self {
        Self::with_runner(tool, SystemRunner)
    }
}

impl<R: ProcessRunner> UploadOrchestrator<R> {
    /// Create an orchestrator with a custom process runner
    pub fn with_runner(tool: &str, runner: R) -> Self {
        Self {
            tool: tool.to_string(),
            runner,
        }
    }

    /// The tool executable this orchestrator invokes
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Invocation arguments in the tool's fixed order: chip selector, port,
    /// baud, the write command with mode flags, then offset/path pairs in
    /// plan order.
    pub fn command_args(plan: &FlashPlan) -> Vec<String> {
        let mut args = vec![
            "--chip".to_string(),
            plan.chip.to_string(),
            "--port".to_string(),
            plan.connection.port.clone(),
            "--baud".to_string(),
            plan.connection.baud.to_string(),
            "write_flash".to_string(),
            "--flash_mode".to_string(),
            plan.flash_mode.clone(),
            "--flash_freq".to_string(),
            plan.flash_freq.clone(),
            "--flash_size".to_string(),
            plan.flash_size.clone(),
        ];

        for image in &plan.images {
            args.push(format!("{:#06x}", image.offset));
            args.push(image.path.display().to_string());
        }

        args
    }

    /// Execute the plan, blocking until the tool terminates
    pub fn upload(&self, plan: &FlashPlan) -> UploadResult {
        let args = Self::command_args(plan);
        tracing::debug!("Invoking {} {}", self.tool, args.join(" "));

        let output = match self.runner.run(&self.tool, &args) {
            Ok(output) => output,
            Err(e) => {
                return UploadResult {
                    outcome: UploadOutcome::ToolNotFound,
                    stdout: String::new(),
                    stderr: e.to_string(),
                };
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let outcome = if output.status.success() {
            UploadOutcome::Success
        } else {
            UploadOutcome::Failed {
                exit_code: output.status.code().unwrap_or(-1),
            }
        };

        UploadResult {
            outcome,
            stdout,
            stderr,
        }
    }
}
