//! Picking the right credential out of a vault query

use anyhow::{bail, Result};
use keyring_core::Prompter;

use crate::error::KeyringError;
use crate::item::Item;

pub const MULTIPLE_MATCHES_HEADER: &str =
    "Multiple credential found. Which one would you like to use ?";

/// Items whose login is `username` and which carry a password key, in order
pub fn match_credentials<'a>(
    items: &'a [Item],
    username: &'a str,
) -> impl Iterator<Item = &'a Item> + 'a {
    items.iter().filter(move |item| {
        item.login.username.as_deref() == Some(username) && item.login.has_password()
    })
}

/// Resolve a match set to a password.
///
/// None for no match. A single match yields its password. Several matches
/// are put to the user, and an answer that names none of them is an error.
pub fn select_match(matches: &[&Item], prompter: &dyn Prompter) -> Result<Option<String>> {
    match matches {
        [] => Ok(None),
        [single] => Ok(single.login.password().map(str::to_string)),
        many => select_from_multiple_matches(many, prompter),
    }
}

fn select_from_multiple_matches(matches: &[&Item], prompter: &dyn Prompter) -> Result<Option<String>> {
    let options: Vec<String> = matches.iter().map(|item| item.display()).collect();
    let answer = prompter.choose(MULTIPLE_MATCHES_HEADER, &options)?;

    let chosen = answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| matches.get(i));

    match chosen {
        Some(item) => Ok(item.login.password().map(str::to_string)),
        None => bail!(KeyringError::InvalidChoice(answer)),
    }
}
