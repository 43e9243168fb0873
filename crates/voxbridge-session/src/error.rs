use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("voice-AI request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("voice-AI API error: {status}, {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("failed to parse voice-AI response: {0}")]
    MalformedResponse(String),

    /// The provider answered but gave no `joinUrl`. Carries the full body.
    #[error("failed to get join URL from voice-AI provider")]
    MissingJoinUrl { response: Value },

    #[error("invalid configuration: {0}")]
    Config(String),
}
