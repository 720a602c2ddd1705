//! Platform and environment lookups used to locate backend files
//!
//! Nothing here reads ambient process state on its own: callers capture
//! the environment once with [`capture_env`] and pass it, together with a
//! [`Platform`], to every lookup. Tests hand in whatever they like.

use std::collections::HashMap;
use std::path::PathBuf;

/// Snapshot of process environment variables
pub type Env = HashMap<String, String>;

/// Capture the current process environment
pub fn capture_env() -> Env {
    std::env::vars().collect()
}

/// Operating system family, as far as file locations are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    /// Linux and every other Unix-like system
    Linux,
}

impl Platform {
    /// The platform this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

/// Home directory: `HOME` (or `USERPROFILE` on Windows), else the OS lookup
pub fn home_dir(env: &Env, platform: Platform) -> PathBuf {
    let var = match platform {
        Platform::Windows => "USERPROFILE",
        _ => "HOME",
    };

    env.get(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("~"))
}

/// Per-user application configuration directory
///
/// - macOS: `~/Library/Application Support`
/// - Windows: `%APPDATA%` (or `~/AppData/Roaming`)
/// - Linux: `$XDG_CONFIG_HOME` (or `~/.config`)
pub fn app_config_dir(env: &Env, platform: Platform) -> PathBuf {
    match platform {
        Platform::MacOs => home_dir(env, platform)
            .join("Library")
            .join("Application Support"),
        Platform::Windows => non_empty(env, "APPDATA")
            .unwrap_or_else(|| home_dir(env, platform).join("AppData").join("Roaming")),
        Platform::Linux => non_empty(env, "XDG_CONFIG_HOME")
            .unwrap_or_else(|| home_dir(env, platform).join(".config")),
    }
}

/// Configuration directory of a snap-packaged application (`~/snap/<name>/current/.config`)
pub fn snap_config_dir(env: &Env, snap: &str) -> PathBuf {
    home_dir(env, Platform::Linux)
        .join("snap")
        .join(snap)
        .join("current")
        .join(".config")
}

fn non_empty(env: &Env, var: &str) -> Option<PathBuf> {
    env.get(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}
