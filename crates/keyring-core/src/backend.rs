//! Host interface every keyring backend implements

use anyhow::Result;

/// A password storage backend as seen by the host password manager.
///
/// The host asks each registered backend for its priority and routes
/// calls to the highest one that answers. A backend that cannot work
/// on this machine reports that from `priority`, not from the
/// individual operations.
pub trait KeyringBackend {
    /// Short identifier used in diagnostics
    fn name(&self) -> &str;

    /// Preference over other backends (higher wins).
    ///
    /// Fails when the backend is unusable here, e.g. its external tool
    /// is missing.
    fn priority(&self) -> Result<f64>;

    /// Look up the password stored for `username` at `service`
    fn get_password(&self, service: &str, username: &str) -> Result<Option<String>>;

    /// Store a password for `username` at `service`
    fn set_password(&self, service: &str, username: &str, password: &str) -> Result<()>;

    /// Remove the password stored for `username` at `service`
    fn delete_password(&self, service: &str, username: &str) -> Result<()>;
}
