//! Shared wire types for the voxbridge workspace.
//!
//! This crate defines the session payloads exchanged with the voice-AI
//! provider. Caller-supplied configuration is kept as raw JSON so that it
//! survives a deserialize/serialize cycle unchanged.

pub mod session;

pub use session::{
    is_tool_named, SessionConfig, SessionResponse, CORPUS_ID_PARAM, FIRST_SPEAKER_USER,
    RESOURCE_QUERY_TOOL, SELECTED_TOOLS_FIELD,
};
