//! Voice-AI session plumbing.
//!
//! Covers everything between "a request needs a voice-AI session" and the
//! provider's answer: the per-slot corpus mapping, the request builder that
//! applies it, the fixed template used for telephony calls, and the HTTP
//! client for the provider's call-creation endpoint.

pub mod builder;
pub mod client;
pub mod error;
pub mod resources;
pub mod template;

pub use builder::build_session_request;
pub use client::{VoiceAiClient, DEFAULT_API_URL};
pub use error::SessionError;
pub use resources::{ResourceMapping, CORPUS_OVERRIDE_PREFIX};
pub use template::{CallTemplate, CURRENT_TIME_PLACEHOLDER};
