//! Session acquisition
//!
//! Every operation needs a session token. Resolution goes:
//!
//! 1. `BW_SESSION` from the environment, if set and (optionally) a `sync`
//!    with it succeeds.
//! 2. Otherwise work out whether the user is logged in, either by asking
//!    `bw login --check` or by reading bw's local `data.json`.
//! 3. `bw unlock --raw` when logged in, `bw login --raw` when not. The
//!    printed value is the new token.

use anyhow::{Context, Result};
use keyring_core::paths::{app_config_dir, snap_config_dir, Env};
use keyring_core::{Platform, Prompter};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bw::Bw;
use crate::config::{Config, LoginCheck};
use crate::error::KeyringError;

/// Environment variable holding a pre-supplied session token
pub const SESSION_VAR: &str = "BW_SESSION";

/// Environment variable overriding bw's data directory
pub const APPDATA_DIR_VAR: &str = "BITWARDENCLI_APPDATA_DIR";

/// Field of data.json naming the logged-in account
const LOGGED_USER_FIELD: &str = "userEmail";

/// Location of bw's data.json
pub fn session_db_location(env: &Env, platform: Platform) -> PathBuf {
    session_db_location_with(env, platform, |path| path.exists())
}

/// Location of bw's data.json, with the directory probe supplied by the caller.
///
/// `BITWARDENCLI_APPDATA_DIR` wins outright. On Linux the snap install's
/// config directory is used when it exists.
pub fn session_db_location_with(
    env: &Env,
    platform: Platform,
    exists: impl Fn(&Path) -> bool,
) -> PathBuf {
    if let Some(dir) = env.get(APPDATA_DIR_VAR).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir).join("data.json");
    }

    let config_dir = match platform {
        Platform::MacOs | Platform::Windows => app_config_dir(env, platform),
        Platform::Linux => {
            let snap = snap_config_dir(env, "bw");
            if exists(&snap) {
                snap
            } else {
                app_config_dir(env, platform)
            }
        }
    };

    config_dir.join("Bitwarden CLI").join("data.json")
}

/// Read data.json. A missing or unreadable file reads as an empty object.
pub fn open_db(path: &Path) -> Result<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read bw data file");
            return Ok(Value::Object(Map::new()));
        }
    };

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

pub fn extract_logged_user(db: &Value) -> Option<&str> {
    db.get(LOGGED_USER_FIELD).and_then(Value::as_str)
}

/// `unlock` resumes an existing login, `login` starts one
pub fn session_command(is_authenticated: bool) -> &'static str {
    if is_authenticated {
        "unlock"
    } else {
        "login"
    }
}

#[derive(Debug, Clone)]
pub struct SessionResolver {
    pub login_check: LoginCheck,
    pub validate_env_session: bool,
    pub platform: Platform,
}

impl SessionResolver {
    pub fn new(config: &Config, platform: Platform) -> Self {
        Self {
            login_check: config.login_check,
            validate_env_session: config.validate_env_session,
            platform,
        }
    }

    /// Produce a usable session token, authenticating interactively if needed
    pub fn resolve(&self, bw: &Bw, prompter: &dyn Prompter, env: &Env) -> Result<String> {
        if let Some(token) = env.get(SESSION_VAR).filter(|t| !t.is_empty()) {
            if !self.validate_env_session {
                tracing::info!("using session from {}", SESSION_VAR);
                return Ok(token.clone());
            }

            match bw.run(&["sync"], Some(token), prompter) {
                Ok(_) => {
                    tracing::info!("using session from {}", SESSION_VAR);
                    return Ok(token.clone());
                }
                Err(e) if e.downcast_ref::<KeyringError>().is_some() => {
                    tracing::info!(error = %e, "session from {} rejected", SESSION_VAR);
                }
                Err(e) => return Err(e),
            }
        }

        let command = session_command(self.is_authenticated(bw, env)?);
        tracing::info!(command, "requesting new session");
        bw.run(&[command, "--raw"], None, prompter)
    }

    /// Whether bw already has a logged-in account
    pub fn is_authenticated(&self, bw: &Bw, env: &Env) -> Result<bool> {
        match self.login_check {
            LoginCheck::Command => bw.succeeds(&["login", "--check"], None),
            LoginCheck::Database => {
                let db = open_db(&session_db_location(env, self.platform))?;
                Ok(extract_logged_user(&db).is_some())
            }
        }
    }
}
