//! Outbound telephony call handler.

use crate::{api::ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use voxbridge_telephony::stream_twiml;

/// Request body for `POST /outbound-call`.
#[derive(Debug, Deserialize)]
pub struct OutboundCallRequest {
    /// Destination number, E.164 preferred.
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
}

/// Response body for a placed call.
#[derive(Debug, Serialize, Deserialize)]
pub struct OutboundCallResponse {
    pub success: bool,
    #[serde(rename = "callSid")]
    pub call_sid: String,
    pub message: String,
}

/// Handler for `POST /outbound-call`.
///
/// Creates a voice-AI session from the configured call template, then asks
/// Twilio to dial `phoneNumber` and stream the call audio to the session's
/// join URL. Nothing is retried.
pub async fn outbound_call_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<OutboundCallRequest>, JsonRejection>,
) -> Result<Json<OutboundCallResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("rejected outbound call body: {}", e);
        ApiError::BadRequest(e.body_text())
    })?;

    let phone_number = payload
        .phone_number
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Phone number is required".to_string()))?;

    let api_key = state.keys.select_key().map_err(|e| {
        tracing::error!("voice-AI key selection failed: {}", e);
        ApiError::InternalServerError(e.to_string())
    })?;

    tracing::info!("creating voice-AI session for outbound call");
    let session_config = state.call_template.render(chrono::Local::now());
    let session = state
        .voice_ai
        .create_call(&api_key, &session_config)
        .await
        .map_err(|e| {
            tracing::error!("voice-AI session creation failed: {}", e);
            ApiError::from(e)
        })?;

    // create_call guarantees a non-empty join URL.
    let join_url = session.join_url().unwrap_or_default();
    tracing::debug!(join_url, "voice-AI session created");

    let call = state
        .telephony
        .place_call(&phone_number, &stream_twiml(join_url))
        .await
        .map_err(|e| {
            tracing::error!("outbound call placement failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(OutboundCallResponse {
        success: true,
        call_sid: call.sid,
        message: "Call initiated successfully".to_string(),
    }))
}
