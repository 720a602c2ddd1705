//! Fetch, store and remove credentials in the vault
//!
//! Each operation resolves its own session first and keeps nothing once
//! it returns.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use keyring_core::paths::{capture_env, Env};
use keyring_core::{CommandRunner, Platform, Prompter, SystemRunner, TerminalPrompter};
use serde_json::{json, Value};

use crate::bw::Bw;
use crate::config::{Config, SearchMode};
use crate::domain::extract_domain_name;
use crate::error::KeyringError;
use crate::item::Item;
use crate::matcher::{match_credentials, select_match};
use crate::session::SessionResolver;

pub struct BitwardenKeyring {
    bw: Bw,
    resolver: SessionResolver,
    search: SearchMode,
    prompter: Box<dyn Prompter>,
    env: Env,
}

impl BitwardenKeyring {
    /// Keyring talking to the real bw binary and terminal
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            config,
            Box::new(SystemRunner),
            Box::new(TerminalPrompter),
            capture_env(),
            Platform::current(),
        )
    }

    pub fn with_parts(
        config: &Config,
        runner: Box<dyn CommandRunner>,
        prompter: Box<dyn Prompter>,
        env: Env,
        platform: Platform,
    ) -> Self {
        Self {
            bw: Bw::new(config.binary.clone(), config.error_mode, runner),
            resolver: SessionResolver::new(config, platform),
            search: config.search,
            prompter,
            env,
        }
    }

    pub fn session(&self) -> Result<String> {
        self.resolver
            .resolve(&self.bw, self.prompter.as_ref(), &self.env)
    }

    fn bw(&self, args: &[&str], session: &str) -> Result<String> {
        self.bw.run(args, Some(session), self.prompter.as_ref())
    }

    /// Password for `username` among the items matching `service`
    pub fn get_password(&self, service: &str, username: &str) -> Result<Option<String>> {
        let session = self.session()?;

        self.bw(&["sync"], &session)?;

        let results = match self.search {
            SearchMode::Url => self.bw(&["list", "items", "--url", service], &session)?,
            SearchMode::Domain => {
                let domain = extract_domain_name(service);
                self.bw(&["list", "items", "--search", &domain], &session)?
            }
        };

        let items: Vec<Item> =
            serde_json::from_str(&results).context("Failed to parse vault item list")?;

        let matches: Vec<&Item> = match_credentials(&items, username).collect();
        tracing::debug!(service, candidates = items.len(), matches = matches.len(), "vault lookup");

        select_match(&matches, self.prompter.as_ref())
    }

    /// Create a new login item for `username` at `service`
    pub fn set_password(&self, service: &str, username: &str, password: &str) -> Result<()> {
        let session = self.session()?;

        let template = self.bw(&["get", "template", "item"], &session)?;
        let template: Value =
            serde_json::from_str(&template).context("Failed to parse item template")?;

        let payload = encode(&build_item(template, service, username, password)?)?;

        self.bw(&["create", "item", &payload], &session)?;
        self.prompter.notify("Created.");

        Ok(())
    }

    /// Delete the item found for `service`, after the user confirms.
    ///
    /// `username` is accepted to match the keyring interface; the item is
    /// whatever `bw get item <service>` returns.
    pub fn delete_password(&self, service: &str, _username: &str) -> Result<()> {
        let session = self.session()?;

        self.bw(&["sync"], &session)?;

        let result = self.bw(&["get", "item", service], &session)?;
        let item: Item = serde_json::from_str(&result).context("Failed to parse vault item")?;

        self.confirm_delete(&session, &item)
    }

    fn confirm_delete(&self, session: &str, item: &Item) -> Result<()> {
        let Some(id) = item.id.as_deref() else {
            bail!(KeyringError::MissingItemId);
        };

        self.prompter.notify("The following match will be DELETED:");
        self.prompter.notify(&item.display());

        if self.prompter.confirm("Confirm ? (type 'yes')")? {
            self.bw(&["delete", "item", id], session)?;
            self.prompter.notify("Deleted.");
        } else {
            self.prompter.notify("Cancelled.");
        }

        Ok(())
    }
}

/// Fill an item template with a login for `service`
pub fn build_item(template: Value, service: &str, username: &str, password: &str) -> Result<Value> {
    let mut item = match template {
        Value::Object(item) => item,
        other => bail!(KeyringError::Vault(format!(
            "Unexpected item template: {}",
            other
        ))),
    };

    item.insert("name".to_string(), json!(service));
    item.insert("notes".to_string(), Value::Null);
    item.insert(
        "login".to_string(),
        json!({
            "uris": [{"match": null, "uri": service}],
            "username": username,
            "password": password,
        }),
    );

    Ok(Value::Object(item))
}

/// Base64 of the item's JSON, as `bw create item` expects
pub fn encode(payload: &Value) -> Result<String> {
    let json = serde_json::to_vec(payload)?;
    Ok(STANDARD.encode(json))
}
