//! bitwarden-keyring - Bitwarden vault as a keyring backend
//!
//! "Your passwords already live in the vault. Leave them there."
//!
//! Programs that speak the simple get/set/delete keyring interface get
//! their credentials from a Bitwarden vault instead of the OS keychain.
//! All vault access goes through the official `bw` CLI: this crate owns
//! no storage, no cache and no crypto, only the protocol for getting a
//! session out of `bw` and reading its answers.

pub mod backend;
pub mod bw;
pub mod config;
pub mod domain;
pub mod error;
pub mod item;
pub mod keyring;
pub mod matcher;
pub mod session;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::BitwardenBackend;
pub use config::{Config, ErrorMode, LoginCheck, SearchMode};
pub use error::KeyringError;
pub use item::Item;
pub use keyring::BitwardenKeyring;
