//! Vault items as printed by `bw list items` / `bw get item`
//!
//! Only the fields this backend reads are modelled. Absent or null
//! sub-objects deserialize to their defaults instead of failing.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub login: Login,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Login {
    #[serde(default)]
    pub username: Option<String>,

    /// Outer `None`: no `password` key. `Some(None)`: key present, value null.
    #[serde(default, deserialize_with = "present")]
    pub password: Option<Option<String>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub uris: Vec<LoginUri>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginUri {
    #[serde(default, rename = "match")]
    pub match_type: Option<u8>,

    #[serde(default)]
    pub uri: Option<String>,
}

impl Item {
    /// `<name or "no name"> - <username>`
    pub fn display(&self) -> String {
        format!(
            "{} - {}",
            self.name.as_deref().unwrap_or("no name"),
            self.login.username.as_deref().unwrap_or_default()
        )
    }
}

impl Login {
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().and_then(|p| p.as_deref())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Only called when the key exists, so wrapping in Some records presence.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_login_is_empty() {
        let item: Item = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
        assert_eq!(item.login, Login::default());

        let item: Item = serde_json::from_str(r#"{"id": "a", "login": null}"#).unwrap();
        assert_eq!(item.login, Login::default());
    }

    #[test]
    fn test_password_presence() {
        let absent: Item = serde_json::from_str(r#"{"login": {"username": "a"}}"#).unwrap();
        assert!(!absent.login.has_password());

        let null: Item =
            serde_json::from_str(r#"{"login": {"username": "a", "password": null}}"#).unwrap();
        assert!(null.login.has_password());
        assert_eq!(null.login.password(), None);

        let set: Item =
            serde_json::from_str(r#"{"login": {"username": "a", "password": "b"}}"#).unwrap();
        assert_eq!(set.login.password(), Some("b"));
    }

    #[test]
    fn test_full_item() {
        let item: Item = serde_json::from_str(
            r#"{
                "object": "item",
                "id": "42",
                "name": "example",
                "type": 1,
                "login": {
                    "uris": [{"match": null, "uri": "https://example.com"}],
                    "username": "alice",
                    "password": "hunter2",
                    "totp": null
                }
            }"#,
        )
        .unwrap();

        assert_eq!(item.id.as_deref(), Some("42"));
        assert_eq!(item.login.uris.len(), 1);
        assert_eq!(item.login.uris[0].uri.as_deref(), Some("https://example.com"));
        assert_eq!(item.login.uris[0].match_type, None);
    }

    #[test]
    fn test_display() {
        let mut item = Item::default();
        item.login.username = Some("b".to_string());
        assert_eq!(item.display(), "no name - b");

        item.name = Some("a".to_string());
        assert_eq!(item.display(), "a - b");
    }
}
