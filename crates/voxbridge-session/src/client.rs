use crate::error::SessionError;
use serde_json::Value;
use std::time::Duration;
use voxbridge_types::{SessionConfig, SessionResponse};

/// Default endpoint for creating voice-AI calls.
pub const DEFAULT_API_URL: &str = "https://api.ultravox.ai/api/calls";

/// Client for the voice-AI provider's call-creation endpoint.
#[derive(Debug, Clone)]
pub struct VoiceAiClient {
    http: reqwest::Client,
    api_url: String,
}

impl VoiceAiClient {
    /// Creates a client posting to `api_url` with the given request timeout.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    /// Creates a session and returns the provider's JSON body unmodified.
    ///
    /// # Errors
    ///
    /// Non-2xx statuses become [`SessionError::ProviderStatus`] carrying the
    /// response text; bodies that are not JSON become
    /// [`SessionError::MalformedResponse`].
    pub async fn create_call_raw(
        &self,
        api_key: &str,
        config: &SessionConfig,
    ) -> Result<Value, SessionError> {
        let resp = self
            .http
            .post(&self.api_url)
            .header("X-API-Key", api_key)
            .json(config)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %self.api_url, "voice-AI request error: {}", e);
                SessionError::Network(e)
            })?;

        let status = resp.status();
        tracing::info!(status = status.as_u16(), "voice-AI API response status");

        let body = resp.text().await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "voice-AI API error");
            return Err(SessionError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| SessionError::MalformedResponse(e.to_string()))
    }

    /// Creates a session and requires a join URL in the response.
    pub async fn create_call(
        &self,
        api_key: &str,
        config: &SessionConfig,
    ) -> Result<SessionResponse, SessionError> {
        let raw = self.create_call_raw(api_key, config).await?;
        let response: SessionResponse = match serde_json::from_value(raw.clone()) {
            Ok(response) => response,
            Err(_) => return Err(SessionError::MissingJoinUrl { response: raw }),
        };

        if response.join_url().is_none() {
            tracing::error!(response = %raw, "invalid response from voice-AI provider");
            return Err(SessionError::MissingJoinUrl { response: raw });
        }

        Ok(response)
    }
}
