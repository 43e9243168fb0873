//! Session configuration and response payloads.
//!
//! Field names follow the provider's camelCase JSON.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Name of the built-in tool that queries a knowledge corpus.
pub const RESOURCE_QUERY_TOOL: &str = "queryCorpus";

/// Parameter override key naming the corpus a [`RESOURCE_QUERY_TOOL`] reads.
pub const CORPUS_ID_PARAM: &str = "corpus_id";

/// Provider value meaning the remote party speaks first.
pub const FIRST_SPEAKER_USER: &str = "FIRST_SPEAKER_USER";

/// JSON field holding the session's tool list.
pub const SELECTED_TOOLS_FIELD: &str = "selectedTools";

/// A requested real-time voice-AI session.
///
/// Held as the caller's JSON object, so every field is forwarded exactly as
/// received, explicit `null`s and integer literals included. Only
/// `selectedTools` is ever rewritten, and it must be an array or `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct SessionConfig {
    fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for SessionConfig {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get(SELECTED_TOOLS_FIELD) {
            None | Some(Value::Null) | Some(Value::Array(_)) => Ok(Self { fields }),
            Some(other) => Err(format!(
                "`{SELECTED_TOOLS_FIELD}` must be an array, got {other}"
            )),
        }
    }
}

impl Serialize for SessionConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of `field`, if the caller sent one.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets `field`, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes and returns the tool list. Absent or `null` yields an empty list.
    pub fn take_selected_tools(&mut self) -> Vec<Value> {
        match self.fields.remove(SELECTED_TOOLS_FIELD) {
            Some(Value::Array(tools)) => tools,
            _ => Vec::new(),
        }
    }

    pub fn set_selected_tools(&mut self, tools: Vec<Value>) {
        self.fields
            .insert(SELECTED_TOOLS_FIELD.to_string(), Value::Array(tools));
    }
}

/// Returns `true` if the tool entry `tool` names the tool called `name`.
pub fn is_tool_named(tool: &Value, name: &str) -> bool {
    tool.get("toolName").and_then(Value::as_str) == Some(name)
}

/// Response to a session creation request.
///
/// Only `joinUrl` is interpreted; the rest is kept for logging and relaying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionResponse {
    /// Returns the join URL if present and non-empty.
    pub fn join_url(&self) -> Option<&str> {
        self.join_url.as_deref().filter(|url| !url.is_empty())
    }
}
