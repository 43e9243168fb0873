//! voxbridge server library logic.
//!
//! Two request paths front the voice-AI provider: `POST /outbound-call`
//! places a Twilio call bridged to a fresh session, and
//! `POST /direct-session` proxies a browser's session request.

pub mod api;
pub mod api_call;
pub mod api_session;
pub mod config;
pub mod cors;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use config::Config;
use cors::CorsPolicy;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use voxbridge_keys::KeyPool;
use voxbridge_session::{CallTemplate, ResourceMapping, SessionError, VoiceAiClient};
use voxbridge_telephony::{TelephonyError, TwilioClient};

/// Application state shared across all request handlers.
///
/// Built once at startup and never mutated; handlers only read it.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Voice-AI credential slots.
    pub keys: KeyPool,
    /// Default corpus per credential slot.
    pub resources: ResourceMapping,
    /// Voice-AI call-creation client.
    pub voice_ai: VoiceAiClient,
    /// Twilio client for outbound calls.
    pub telephony: TwilioClient,
    /// Session template for outbound calls.
    pub call_template: CallTemplate,
    /// Origin allow-list for the browser endpoint.
    pub cors: CorsPolicy,
}

/// Errors raised while assembling [`AppState`].
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    VoiceAi(#[from] SessionError),
    #[error(transparent)]
    Telephony(#[from] TelephonyError),
}

impl AppState {
    /// Builds the shared state from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let timeout = config.voice_ai.request_timeout();
        Ok(Self {
            keys: config.key_pool(),
            resources: config.resource_mapping(),
            voice_ai: VoiceAiClient::new(&config.voice_ai.api_url, timeout)?,
            telephony: TwilioClient::new(config.telephony.clone(), timeout)?,
            call_template: config.outbound.clone(),
            cors: CorsPolicy::new(&config.cors.allowed_origins),
        })
    }
}

/// Maximum request body size (1 MiB).
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/outbound-call", post(api_call::outbound_call_handler))
        .route(
            "/direct-session",
            post(api_session::direct_session_handler)
                .options(api_session::direct_session_preflight_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
