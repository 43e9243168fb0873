//! Stand-in provider servers and state builders shared by the API tests.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use voxbridge_server::{config::load_config_with_env, AppState};

pub const VOICE_AI_PATH: &str = "/api/calls";
pub const TWILIO_CALLS_PATH: &str = "/2010-04-01/Accounts/{sid}/Calls.json";

/// One request received by a mock provider.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub headers: HeaderMap,
    pub body: String,
}

/// A throwaway HTTP server answering every POST on one path with a fixed
/// status and body.
#[derive(Clone)]
pub struct MockProvider {
    pub base: String,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockProvider {
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> Recorded {
        self.requests.lock().unwrap().last().cloned().expect("no requests recorded")
    }
}

pub async fn spawn_mock(path: &str, status: StatusCode, body: &'static str) -> MockProvider {
    let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();

    let app = Router::new()
        .route(
            path,
            post(
                move |State(requests): State<Arc<Mutex<Vec<Recorded>>>>,
                      headers: HeaderMap,
                      payload: String| async move {
                    requests.lock().unwrap().push(Recorded {
                        headers,
                        body: payload,
                    });
                    (status, [("content-type", "application/json")], body).into_response()
                },
            ),
        )
        .with_state(requests.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockProvider {
        base: format!("http://{addr}"),
        requests,
    }
}

/// Builds state wired to the given provider base URLs plus extra env vars.
pub fn build_test_state(voice_ai_base: &str, twilio_base: &str, extra: &[(&str, &str)]) -> AppState {
    let mut vars: Vec<(String, String)> = vec![
        ("TWILIO_ACCOUNT_SID".into(), "AC0123".into()),
        ("TWILIO_AUTH_TOKEN".into(), "twilio-token".into()),
        ("TWILIO_PHONE_NUMBER".into(), "+15550001111".into()),
        ("TWILIO_API_BASE".into(), twilio_base.into()),
        ("ULTRAVOX_API_URL".into(), format!("{voice_ai_base}{VOICE_AI_PATH}")),
    ];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    let config = load_config_with_env(None, vars).unwrap();
    config.validate().unwrap();
    AppState::from_config(&config).unwrap()
}

/// Address nothing listens on, for paths that must not reach a provider.
pub async fn dead_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
