//! Keyring Core - Shared functionality for keyring backends
//!
//! A backend answers three questions for a host password manager:
//! what is the password for this service and user, store this one,
//! and forget that one. Everything backend-specific lives in its own
//! crate; this one holds the seams they all share.

pub mod backend;
pub mod paths;
pub mod process;
pub mod prompt;

pub use backend::KeyringBackend;
pub use paths::Platform;
pub use process::{CommandRunner, RunOutput, SystemRunner};
pub use prompt::{Prompter, TerminalPrompter};
