//! Shapes caller session configurations before they are sent upstream.
//!
//! Each credential slot has a default knowledge corpus. When a request is
//! made with a slot that has one, the session's `queryCorpus` tool is pointed
//! at that corpus, either by patching the caller's entry or by appending a
//! new one.

use crate::resources::ResourceMapping;
use serde_json::{json, Map, Value};
use voxbridge_keys::slot_id;
use voxbridge_types::{is_tool_named, SessionConfig, CORPUS_ID_PARAM, RESOURCE_QUERY_TOOL};

/// Produces the configuration to send for a session authenticated with the
/// slot called `key_name`.
///
/// Fields other than `selectedTools` pass through untouched. Only the first
/// `queryCorpus` entry is patched; later duplicates are left as the caller
/// sent them.
pub fn build_session_request(
    mut config: SessionConfig,
    key_name: &str,
    resources: &ResourceMapping,
) -> SessionConfig {
    let Some(id) = slot_id(key_name) else {
        tracing::debug!(slot = key_name, "slot name has no id, skipping corpus injection");
        return config;
    };

    let Some(corpus_id) = resources.resolve(id) else {
        tracing::debug!(slot = key_name, "no corpus mapped for slot");
        return config;
    };

    let mut tools = config.take_selected_tools();
    let position = tools
        .iter()
        .position(|tool| is_tool_named(tool, RESOURCE_QUERY_TOOL));
    match position.and_then(|index| tools[index].as_object_mut()) {
        Some(existing) => {
            let overrides = existing
                .entry("parameterOverrides")
                .or_insert_with(|| Value::Object(Map::new()));
            if !overrides.is_object() {
                *overrides = Value::Object(Map::new());
            }
            if let Value::Object(overrides) = overrides {
                overrides.insert(CORPUS_ID_PARAM.to_string(), Value::from(corpus_id));
            }
        }
        None => {
            let mut overrides = Map::new();
            overrides.insert(CORPUS_ID_PARAM.to_string(), Value::from(corpus_id));
            tools.push(json!({
                "toolName": RESOURCE_QUERY_TOOL,
                "parameterOverrides": overrides,
            }));
        }
    }
    config.set_selected_tools(tools);

    tracing::debug!(slot = key_name, corpus_id, "pointed corpus tool at slot default");
    config
}
