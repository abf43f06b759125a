//! Schema for the subset of webhook payloads Hookline reads.
//!
//! Every field is optional: senders omit fields or send `null` depending on
//! the event (a branch deletion has a `null` head commit, for example). The
//! defaults for missing values are applied by the normalizers, not here.
//! Unknown fields are ignored. Nested structures must be JSON objects; the
//! positional array form serde accepts for structs is rejected.

use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{self, DeserializeOwned},
};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushEvent {
    /// Fully-qualified ref, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default, deserialize_with = "object")]
    pub pusher: Option<Pusher>,
    #[serde(default, deserialize_with = "object")]
    pub head_commit: Option<HeadCommit>,
    #[serde(default, deserialize_with = "object")]
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pusher {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadCommit {
    pub id: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestEvent {
    /// Lifecycle tag: `opened`, `closed`, `reopened`, `synchronize`, ...
    pub action: Option<String>,
    #[serde(default, deserialize_with = "object")]
    pub pull_request: Option<PullRequest>,
    #[serde(default, deserialize_with = "object")]
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    pub id: Option<Identifier>,
    #[serde(default, deserialize_with = "object")]
    pub user: Option<Account>,
    /// Source branch.
    #[serde(default, deserialize_with = "object")]
    pub head: Option<BranchRef>,
    /// Target branch.
    #[serde(default, deserialize_with = "object")]
    pub base: Option<BranchRef>,
    pub created_at: Option<String>,
    pub merged_at: Option<String>,
    pub merged: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub name: Option<String>,
}

/// Identifiers arrive as JSON numbers from some senders and strings from
/// others.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(number) => write!(f, "{number}"),
            Identifier::Text(text) => f.write_str(text),
        }
    }
}

/// Optional nested struct that only decodes from a JSON object or `null`.
fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(fields @ Value::Object(_)) => {
            T::deserialize(fields).map(Some).map_err(de::Error::custom)
        }
        Some(other) => Err(de::Error::custom(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
