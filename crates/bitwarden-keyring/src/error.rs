//! Errors raised by the Bitwarden backend

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyringError {
    /// The vault CLI failed; carries its diagnostic output verbatim
    #[error("{0}")]
    Vault(String),

    #[error("Vault is locked")]
    VaultLocked,

    #[error("Invalid choice: {0:?}")]
    InvalidChoice(String),

    #[error("Requires bitwarden cli ({0} not found on PATH): https://help.bitwarden.com/article/cli/")]
    CliNotInstalled(String),

    #[error("Vault item has no id")]
    MissingItemId,
}
