//! User interaction seam
//!
//! Backends never touch the terminal directly. Anything they need to say
//! or ask goes through a [`Prompter`], which keeps the interactive paths
//! (disambiguation, confirmation, retry notices) testable.

use anyhow::Result;
use std::io::{self, Write};

pub trait Prompter {
    /// Show a message to the user
    fn notify(&self, message: &str);

    /// Show `header` and the 1-based numbered `options`, then return the
    /// user's raw answer. Interpreting the answer is up to the caller.
    fn choose(&self, header: &str, options: &[String]) -> Result<String>;

    /// Show `message` and ask for confirmation.
    /// Only an explicit "yes" (any case) confirms.
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Prompter backed by stdout/stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn ask(&self, question: &str) -> Result<String> {
        print!("{}", question);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }

    fn choose(&self, header: &str, options: &[String]) -> Result<String> {
        println!("{}", header);
        println!("{}", numbered(options));
        self.ask("Your choice ? ")
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        let answer = self.ask(message)?;
        Ok(answer.eq_ignore_ascii_case("yes"))
    }
}

/// Render options as `1) first`, `2) second`, ... one per line
pub fn numbered(options: &[String]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}) {}", i + 1, option))
        .collect::<Vec<_>>()
        .join("\n")
}
