use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelephonyError {
    #[error("telephony request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider refused to place the call.
    #[error("telephony provider rejected call ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("failed to parse telephony response: {0}")]
    MalformedResponse(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
