//! Configuration loading for bitwarden-keyring
//!
//! Configuration file: ~/.config/bitwarden-keyring/config.toml
//!
//! ```toml
//! binary = "bw"
//! error_mode = "exit-code"    # or "sentinel"
//! login_check = "command"     # or "database"
//! search = "url"              # or "domain"
//! validate_env_session = true
//! priority = 10
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How failures of the vault CLI are detected.
///
/// Different `bw` releases signal failure differently, so both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorMode {
    /// Non-zero exit status is a failure; wrong master password is retried
    #[default]
    ExitCode,
    /// Exit status is ignored; the "Vault is locked." sentinel on stdout is a failure
    Sentinel,
}

/// How to tell whether the user is already logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoginCheck {
    /// Ask `bw login --check`
    #[default]
    Command,
    /// Look for a logged-in user in bw's local data.json
    Database,
}

/// How a service name becomes a vault query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// `bw list items --url <service>`
    #[default]
    Url,
    /// `bw list items --search <registrable domain of service>`
    Domain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault CLI executable
    pub binary: String,

    pub error_mode: ErrorMode,

    pub login_check: LoginCheck,

    pub search: SearchMode,

    /// Check that a `BW_SESSION` from the environment still works before using it
    pub validate_env_session: bool,

    /// Priority reported to the host keyring
    pub priority: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: "bw".to_string(),
            error_mode: ErrorMode::default(),
            login_check: LoginCheck::default(),
            search: SearchMode::default(),
            validate_env_session: true,
            priority: 10.0,
        }
    }
}

impl Config {
    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path, or defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bitwarden-keyring")
            .join("config.toml")
    }
}
