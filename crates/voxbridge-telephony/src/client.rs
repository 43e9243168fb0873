use crate::config::TwilioConfig;
use crate::error::TelephonyError;
use serde::Deserialize;
use std::time::Duration;

/// A call accepted by Twilio.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacedCall {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Shape of a Twilio REST error body.
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for placing outbound calls.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    http: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioClient {
    pub fn new(config: TwilioConfig, timeout: Duration) -> Result<Self, TelephonyError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TelephonyError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Places a call to `to` that executes `twiml` once answered.
    ///
    /// # Errors
    ///
    /// Returns [`TelephonyError::Rejected`] for non-2xx answers, using the
    /// provider's error message when one is present.
    pub async fn place_call(&self, to: &str, twiml: &str) -> Result<PlacedCall, TelephonyError> {
        let resp = self
            .http
            .post(self.config.calls_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("Twiml", twiml),
                ("To", to),
                ("From", self.config.phone_number.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TwilioErrorBody>(&body) {
                Ok(TwilioErrorBody {
                    message: Some(message),
                    code,
                }) => match code {
                    Some(code) => format!("{message} (code {code})"),
                    None => message,
                },
                _ => body,
            };
            tracing::error!(status = status.as_u16(), %message, "telephony provider rejected call");
            return Err(TelephonyError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let call: PlacedCall = serde_json::from_str(&body)
            .map_err(|e| TelephonyError::MalformedResponse(e.to_string()))?;
        if call.sid.is_empty() {
            return Err(TelephonyError::MalformedResponse(
                "response has an empty call sid".to_string(),
            ));
        }

        tracing::info!(call_sid = %call.sid, "outbound call placed");
        Ok(call)
    }
}
