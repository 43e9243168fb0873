//! Direct session proxy for browser clients.

use crate::{api::ProxyError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use voxbridge_session::build_session_request;
use voxbridge_types::SessionConfig;

/// Handler for `OPTIONS /direct-session`.
pub async fn direct_session_preflight_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    (StatusCode::OK, state.cors.headers_for(&headers)).into_response()
}

/// Handler for `POST /direct-session`.
///
/// Forwards the caller's session configuration, with the chosen credential's
/// default corpus applied, and relays the provider's JSON unchanged. Every
/// response, including errors, carries the CORS headers.
pub async fn direct_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<SessionConfig>, JsonRejection>,
) -> Response {
    let cors = state.cors.headers_for(&headers);
    match proxy_session(&state, payload).await {
        Ok(body) => (cors, Json(body)).into_response(),
        Err(e) => {
            tracing::error!("direct session request failed: {}", e);
            (cors, e).into_response()
        }
    }
}

async fn proxy_session(
    state: &AppState,
    payload: Result<Json<SessionConfig>, JsonRejection>,
) -> Result<Value, ProxyError> {
    let Json(config) = payload.map_err(|e| ProxyError::bad_request(e.body_text()))?;

    let selected = state
        .keys
        .select_key_info()
        .map_err(|e| ProxyError::upstream(e.to_string()))?;
    tracing::info!(slot = %selected.key_name, "forwarding direct session request");

    let config = build_session_request(config, &selected.key_name, &state.resources);
    let body = state
        .voice_ai
        .create_call_raw(&selected.api_key, &config)
        .await?;

    Ok(body)
}
