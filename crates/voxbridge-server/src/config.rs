//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use thiserror::Error;
use voxbridge_keys::{KeyPool, SLOT_PREFIX};
use voxbridge_session::{CallTemplate, ResourceMapping, CORPUS_OVERRIDE_PREFIX, DEFAULT_API_URL};
use voxbridge_telephony::TwilioConfig;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Twilio account used for outbound calls.
    #[serde(default)]
    pub telephony: TwilioConfig,

    /// Voice-AI provider endpoint and credentials.
    #[serde(default)]
    pub voice_ai: VoiceAiConfig,

    /// Session template used for outbound calls.
    #[serde(default)]
    pub outbound: CallTemplate,

    /// Origins allowed to call the direct session endpoint.
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "voxbridge_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Voice-AI provider settings.
#[derive(Clone, Deserialize)]
pub struct VoiceAiConfig {
    /// Call-creation endpoint.
    #[serde(default = "default_voice_ai_url")]
    pub api_url: String,

    /// Timeout applied to every outbound HTTP request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Credential slots by name. Only `ULTRAVOX_API_KEY_*` names are used.
    #[serde(default)]
    pub keys: BTreeMap<String, String>,

    /// Corpus id per slot id, overriding the built-in table.
    #[serde(default)]
    pub corpus_overrides: HashMap<String, String>,
}

/// Cross-origin settings for browser sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. The first entry is returned for unknown origins.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_voice_ai_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_allowed_origins() -> Vec<String> {
    [
        "https://genie.elyxa.dev",
        "http://localhost:3000",
        "http://localhost:3001",
        "http://localhost:3002",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for VoiceAiConfig {
    fn default() -> Self {
        Self {
            api_url: default_voice_ai_url(),
            request_timeout_secs: default_request_timeout_secs(),
            keys: BTreeMap::new(),
            corpus_overrides: HashMap::new(),
        }
    }
}

impl fmt::Debug for VoiceAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceAiConfig")
            .field("api_url", &self.api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("keys", &self.keys.keys().collect::<Vec<_>>())
            .field("corpus_overrides", &self.corpus_overrides)
            .finish()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl VoiceAiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Credential slots for the key selector.
    pub fn key_pool(&self) -> KeyPool {
        KeyPool::discover(self.voice_ai.keys.clone())
    }

    /// Slot-to-corpus mapping for the session request builder.
    pub fn resource_mapping(&self) -> ResourceMapping {
        ResourceMapping::new(self.voice_ai.corpus_overrides.clone())
    }

    /// Checks that every setting without a usable default is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("TWILIO_ACCOUNT_SID", &self.telephony.account_sid),
            ("TWILIO_AUTH_TOKEN", &self.telephony.auth_token),
            ("TWILIO_PHONE_NUMBER", &self.telephony.phone_number),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }
        if self.voice_ai.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "voice_ai.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required setting is absent.
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    /// A setting has an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Loads configuration using the process environment for overrides.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with_env(path, std::env::vars())
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies overrides from `vars`.
///
/// Recognised variables:
/// - `VOXBRIDGE_HOST`, `VOXBRIDGE_PORT` override `server.*`
/// - `VOXBRIDGE_LOG_LEVEL`, `VOXBRIDGE_LOG_JSON` override `logging.*`
/// - `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_PHONE_NUMBER`,
///   `TWILIO_API_BASE` override `telephony.*`
/// - `ULTRAVOX_API_URL` overrides `voice_ai.api_url`
/// - every `ULTRAVOX_API_KEY_*` adds or replaces a credential slot
/// - every `ULTRAVOX_CORPUS_ID_<id>` adds or replaces a corpus override
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config_with_env<I>(path: Option<&str>, vars: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    for (name, value) in vars {
        match name.as_str() {
            "VOXBRIDGE_HOST" => {
                if let Ok(parsed) = value.parse() {
                    config.server.host = parsed;
                }
            }
            "VOXBRIDGE_PORT" => {
                if let Ok(parsed) = value.parse() {
                    config.server.port = parsed;
                }
            }
            "VOXBRIDGE_LOG_LEVEL" => config.logging.level = value,
            "VOXBRIDGE_LOG_JSON" => config.logging.json = value == "true" || value == "1",
            "TWILIO_ACCOUNT_SID" => config.telephony.account_sid = value,
            "TWILIO_AUTH_TOKEN" => config.telephony.auth_token = value,
            "TWILIO_PHONE_NUMBER" => config.telephony.phone_number = value,
            "TWILIO_API_BASE" => config.telephony.api_base = value,
            "ULTRAVOX_API_URL" => config.voice_ai.api_url = value,
            _ if name.starts_with(SLOT_PREFIX) => {
                config.voice_ai.keys.insert(name, value);
            }
            _ => {
                if let Some(id) = name.strip_prefix(CORPUS_OVERRIDE_PREFIX) {
                    if !id.is_empty() {
                        config.voice_ai.corpus_overrides.insert(id.to_string(), value);
                    }
                }
            }
        }
    }

    Ok(config)
}
