//! Error types for credential selection.

/// Errors that can occur when selecting a provider credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// No credential slots were discovered in configuration.
    #[error("no voice-AI API keys configured")]
    NoCredentialsConfigured,

    /// A slot was discovered but its secret is empty.
    #[error("API key for slot {0} is undefined")]
    UndefinedSlotValue(String),
}
