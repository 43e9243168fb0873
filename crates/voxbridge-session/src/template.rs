use chrono::{DateTime, Local};
use serde::Deserialize;
use serde_json::json;
use voxbridge_types::{SessionConfig, FIRST_SPEAKER_USER};

/// Placeholder in a template prompt replaced with the wall-clock time.
pub const CURRENT_TIME_PLACEHOLDER: &str = "{current_time}";

const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a friendly voice assistant speaking with a caller over the phone.
Current time: {current_time}
Keep responses brief, one or two sentences, and use spoken-style numbers.
Do not reply if you did not hear anything you can answer.";

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_model() -> String {
    "fixie-ai/ultravox".to_string()
}

fn default_voice() -> String {
    "Mark".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_first_speaker() -> String {
    FIRST_SPEAKER_USER.to_string()
}

/// The fixed session used for telephony calls.
///
/// Outbound calls never carry caller configuration; every call renders this
/// template with a Twilio medium.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallTemplate {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_first_speaker")]
    pub first_speaker: String,
}

impl Default for CallTemplate {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            model: default_model(),
            voice: default_voice(),
            temperature: default_temperature(),
            first_speaker: default_first_speaker(),
        }
    }
}

impl CallTemplate {
    /// Renders the session configuration for a call starting at `now`.
    pub fn render(&self, now: DateTime<Local>) -> SessionConfig {
        let prompt = self
            .system_prompt
            .replace(CURRENT_TIME_PLACEHOLDER, &now.to_rfc2822());

        let mut config = SessionConfig::new();
        config.set("systemPrompt", prompt);
        config.set("model", self.model.as_str());
        config.set("voice", self.voice.as_str());
        config.set("temperature", self.temperature);
        config.set("firstSpeaker", self.first_speaker.as_str());
        config.set("medium", json!({ "twilio": {} }));
        config
    }
}
