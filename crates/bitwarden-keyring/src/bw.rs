//! Invocation of the `bw` command-line tool
//!
//! Every vault access goes through [`Bw::run`], which builds the argv
//! (`bw [--session <token>] <subcommand> <args...>`), captures stdout and
//! decides whether the call failed. How failure is detected depends on
//! the [`ErrorMode`]: older releases report it through the exit status,
//! newer ones exit 0 and print a sentinel instead.

use anyhow::{bail, Result};
use keyring_core::{CommandRunner, Prompter};

use crate::config::ErrorMode;
use crate::error::KeyringError;

/// Output fragments meaning the master password was wrong
pub const WRONG_PASSWORD_MESSAGES: [&str; 2] =
    ["Username or password is incorrect", "Invalid master password"];

/// Exact stdout printed by bw when a command needs an unlocked vault
pub const LOCKED_SENTINEL: &str = "Vault is locked.";

pub struct Bw {
    binary: String,
    mode: ErrorMode,
    runner: Box<dyn CommandRunner>,
}

impl Bw {
    pub fn new(binary: impl Into<String>, mode: ErrorMode, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            binary: binary.into(),
            mode,
            runner,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Full argv for a bw call, with the session flag first when present
    pub fn argv(&self, args: &[&str], session: Option<&str>) -> Vec<String> {
        let mut argv = vec![self.binary.clone()];
        if let Some(token) = session.filter(|t| !t.is_empty()) {
            argv.push("--session".to_string());
            argv.push(token.to_string());
        }
        argv.extend(args.iter().map(|a| a.to_string()));
        argv
    }

    /// Run a command and return its trimmed stdout.
    ///
    /// In exit-code mode a wrong master password is shown to the user and
    /// the command is run again (bw prompts for the password itself); any
    /// other failure is a [`KeyringError::Vault`] carrying bw's output.
    pub fn run(&self, args: &[&str], session: Option<&str>, prompter: &dyn Prompter) -> Result<String> {
        let argv = self.argv(args, session);
        let subcommand = args.first().copied().unwrap_or_default();

        loop {
            tracing::debug!(
                subcommand,
                with_session = session.is_some(),
                "running bw"
            );

            let output = self.runner.run(&argv)?;
            let stdout = output.stdout.trim();

            match self.mode {
                ErrorMode::ExitCode => {
                    if output.success {
                        return Ok(stdout.to_string());
                    }

                    if is_wrong_password(stdout) {
                        tracing::warn!(subcommand, "wrong master password, asking again");
                        prompter.notify(stdout);
                        continue;
                    }

                    bail!(KeyringError::Vault(stdout.to_string()));
                }
                ErrorMode::Sentinel => {
                    if stdout == LOCKED_SENTINEL {
                        bail!(KeyringError::VaultLocked);
                    }
                    return Ok(stdout.to_string());
                }
            }
        }
    }

    /// Run a command only for its exit status
    pub fn succeeds(&self, args: &[&str], session: Option<&str>) -> Result<bool> {
        let output = self.runner.run(&self.argv(args, session))?;
        Ok(output.success)
    }
}

pub fn is_wrong_password(output: &str) -> bool {
    WRONG_PASSWORD_MESSAGES
        .iter()
        .any(|message| output.contains(message))
}
