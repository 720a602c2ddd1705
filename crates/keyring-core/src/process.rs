//! Subprocess execution for CLI-backed keyrings
//!
//! Backends talk to their external tool through [`CommandRunner`] so the
//! protocol logic can be exercised without the tool installed.

use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

/// Captured result of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Everything the process wrote to stdout, untrimmed
    pub stdout: String,
}

impl RunOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
        }
    }

    pub fn failed(stdout: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: stdout.into(),
        }
    }
}

/// Runs an argv and reports how it went
pub trait CommandRunner {
    /// `argv[0]` is the program, the rest its arguments
    fn run(&self, argv: &[String]) -> Result<RunOutput>;
}

/// Runs commands for real.
///
/// stdin and stderr stay attached to the terminal so the tool can ask
/// for a master password itself; only stdout is captured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Result<RunOutput> {
        let Some((program, args)) = argv.split_first() else {
            bail!("Empty command line");
        };

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("Failed to execute {}", program))?;

        tracing::trace!(program = %program, status = %output.status, "command finished");

        Ok(RunOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}
