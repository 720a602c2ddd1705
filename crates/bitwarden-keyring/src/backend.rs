//! Host-facing Bitwarden backend

use anyhow::{bail, Result};
use keyring_core::KeyringBackend;
use which::which;

use crate::config::Config;
use crate::error::KeyringError;
use crate::keyring::BitwardenKeyring;

pub struct BitwardenBackend {
    keyring: BitwardenKeyring,
    binary: String,
    priority: f64,
}

impl BitwardenBackend {
    pub fn new(config: &Config) -> Self {
        Self::from_keyring(BitwardenKeyring::new(config), config)
    }

    pub fn from_keyring(keyring: BitwardenKeyring, config: &Config) -> Self {
        Self {
            keyring,
            binary: config.binary.clone(),
            priority: config.priority,
        }
    }
}

/// Whether `binary` can be found on PATH
pub fn bitwarden_cli_installed(binary: &str) -> bool {
    which(binary).is_ok()
}

impl KeyringBackend for BitwardenBackend {
    fn name(&self) -> &str {
        "bitwarden"
    }

    fn priority(&self) -> Result<f64> {
        if !bitwarden_cli_installed(&self.binary) {
            bail!(KeyringError::CliNotInstalled(self.binary.clone()));
        }
        Ok(self.priority)
    }

    fn get_password(&self, service: &str, username: &str) -> Result<Option<String>> {
        self.keyring.get_password(service, username)
    }

    fn set_password(&self, service: &str, username: &str, password: &str) -> Result<()> {
        self.keyring.set_password(service, username, password)
    }

    fn delete_password(&self, service: &str, username: &str) -> Result<()> {
        self.keyring.delete_password(service, username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{argv, ScriptedPrompter, ScriptedRunner};
    use keyring_core::paths::Env;
    use keyring_core::{Platform, RunOutput};

    fn backend(config: &Config, runner: &ScriptedRunner, prompter: &ScriptedPrompter) -> BitwardenBackend {
        let mut env = Env::new();
        env.insert("BW_SESSION".to_string(), "s".to_string());
        let keyring = BitwardenKeyring::with_parts(
            config,
            Box::new(runner.clone()),
            Box::new(prompter.clone()),
            env,
            Platform::Linux,
        );
        BitwardenBackend::from_keyring(keyring, config)
    }

    #[test]
    fn test_bitwarden_cli_installed() {
        assert!(!bitwarden_cli_installed("definitely-not-a-real-binary-4f1c"));
    }

    #[test]
    fn test_priority_not_installed() {
        let config = Config {
            binary: "definitely-not-a-real-binary-4f1c".to_string(),
            ..Config::default()
        };
        let backend = backend(&config, &ScriptedRunner::default(), &ScriptedPrompter::default());

        let err = backend.priority().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KeyringError>(),
            Some(KeyringError::CliNotInstalled(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_priority_installed() {
        let config = Config {
            binary: "sh".to_string(),
            ..Config::default()
        };
        let backend = backend(&config, &ScriptedRunner::default(), &ScriptedPrompter::default());

        assert_eq!(backend.priority().unwrap(), 10.0);
    }

    #[test]
    fn test_get_password_delegates() {
        let runner = ScriptedRunner::new([
            RunOutput::ok(""),
            RunOutput::ok(""),
            RunOutput::ok(r#"[{"login": {"username": "b", "password": "p"}}]"#),
        ]);
        let prompter = ScriptedPrompter::default();

        let password = backend(&Config::default(), &runner, &prompter)
            .get_password("a", "b")
            .unwrap();

        assert_eq!(password, Some("p".to_string()));
    }

    #[test]
    fn test_set_password_delegates() {
        let runner = ScriptedRunner::new([RunOutput::ok(""), RunOutput::ok("{}"), RunOutput::ok("")]);
        let prompter = ScriptedPrompter::default();

        backend(&Config::default(), &runner, &prompter)
            .set_password("a", "b", "c")
            .unwrap();

        assert_eq!(runner.last_call().unwrap()[3..5], argv(&["create", "item"])[..]);
    }

    #[test]
    fn test_delete_password_delegates() {
        let runner = ScriptedRunner::new([
            RunOutput::ok(""),
            RunOutput::ok(""),
            RunOutput::ok(r#"{"id": "x"}"#),
            RunOutput::ok(""),
        ]);
        let prompter = ScriptedPrompter::new(&["yes"]);

        backend(&Config::default(), &runner, &prompter)
            .delete_password("a", "b")
            .unwrap();

        assert_eq!(
            runner.last_call(),
            Some(argv(&["bw", "--session", "s", "delete", "item", "x"]))
        );
    }
}
