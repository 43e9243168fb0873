mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{build_test_state, dead_base, spawn_mock, VOICE_AI_PATH};
use serde_json::{json, Value};
use tower::ServiceExt;
use voxbridge_server::app;

fn session_request(origin: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/direct-session")
        .header(header::ORIGIN, origin)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const PROVIDER_REPLY: &str =
    r#"{"callId":"c-42","joinUrl":"wss://join.test/c-42","created":"2024-05-01T10:00:00Z","ended":null}"#;

#[tokio::test]
async fn relays_provider_json_and_injects_slot_corpus() {
    let voice_ai = spawn_mock(VOICE_AI_PATH, StatusCode::CREATED, PROVIDER_REPLY).await;
    let dead = dead_base().await;
    let state = build_test_state(&voice_ai.base, &dead, &[("ULTRAVOX_API_KEY_2", "slot-two")]);

    let request_body = json!({
        "systemPrompt": "You are Genie.",
        "model": "fixie-ai/ultravox-70B",
        "voice": "terrence",
        "temperature": 0.4,
        "languageHint": "en",
        "selectedTools": [
            { "toolName": "createProfile" },
            { "toolName": "queryCorpus", "parameterOverrides": { "max_results": 3, "corpus_id": "stale" } }
        ]
    });

    let response = app(state)
        .oneshot(session_request("http://localhost:3000", &request_body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(json_body(response).await, serde_json::from_str::<Value>(PROVIDER_REPLY).unwrap());

    let forwarded = voice_ai.last();
    assert_eq!(forwarded.headers.get("x-api-key").unwrap(), "slot-two");
    let forwarded: Value = serde_json::from_str(&forwarded.body).unwrap();
    assert_eq!(forwarded["systemPrompt"], "You are Genie.");
    assert_eq!(forwarded["languageHint"], "en");
    assert_eq!(
        forwarded["selectedTools"],
        json!([
            { "toolName": "createProfile" },
            {
                "toolName": "queryCorpus",
                "parameterOverrides": {
                    "max_results": 3,
                    "corpus_id": "9a6a4d53-458f-401d-9f85-534f8c5f5efa"
                }
            }
        ])
    );
}

#[tokio::test]
async fn corpus_override_from_environment_wins() {
    let voice_ai = spawn_mock(VOICE_AI_PATH, StatusCode::CREATED, PROVIDER_REPLY).await;
    let dead = dead_base().await;
    let state = build_test_state(
        &voice_ai.base,
        &dead,
        &[("ULTRAVOX_API_KEY_1", "k"), ("ULTRAVOX_CORPUS_ID_1", "my-corpus")],
    );

    let response = app(state)
        .oneshot(session_request("http://localhost:3000", r#"{"systemPrompt":"hi"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let forwarded: Value = serde_json::from_str(&voice_ai.last().body).unwrap();
    assert_eq!(
        forwarded["selectedTools"],
        json!([{ "toolName": "queryCorpus", "parameterOverrides": { "corpus_id": "my-corpus" } }])
    );
}

#[tokio::test]
async fn unmapped_slot_forwards_tools_unchanged() {
    let voice_ai = spawn_mock(VOICE_AI_PATH, StatusCode::CREATED, PROVIDER_REPLY).await;
    let dead = dead_base().await;
    let state = build_test_state(&voice_ai.base, &dead, &[("ULTRAVOX_API_KEY_17", "k")]);

    let tools = json!([{ "toolName": "queryCorpus", "parameterOverrides": { "foo": 1 } }]);
    let body = json!({ "systemPrompt": "hi", "selectedTools": tools });

    let response = app(state)
        .oneshot(session_request("http://localhost:3000", &body.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let forwarded: Value = serde_json::from_str(&voice_ai.last().body).unwrap();
    assert_eq!(forwarded, body);
}

#[tokio::test]
async fn untouched_fields_are_forwarded_byte_for_byte() {
    let voice_ai = spawn_mock(VOICE_AI_PATH, StatusCode::CREATED, PROVIDER_REPLY).await;
    let dead = dead_base().await;

    // Slot 17 has no corpus, so the whole body must arrive unchanged.
    let unmapped = build_test_state(&voice_ai.base, &dead, &[("ULTRAVOX_API_KEY_17", "k")]);
    let body = r#"{"languageHint":null,"systemPrompt":"x","temperature":1}"#;
    let response = app(unmapped)
        .oneshot(session_request("http://localhost:3000", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(voice_ai.last().body, body);

    // Slot 1 rewrites only the tool list.
    let mapped = build_test_state(&voice_ai.base, &dead, &[("ULTRAVOX_API_KEY_1", "k")]);
    let response = app(mapped)
        .oneshot(session_request("http://localhost:3000", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let forwarded = voice_ai.last().body;
    assert!(forwarded.contains(r#""languageHint":null"#), "{forwarded}");
    assert!(forwarded.contains(r#""temperature":1,"#) || forwarded.ends_with(r#""temperature":1}"#));
    let mut forwarded: Value = serde_json::from_str(&forwarded).unwrap();
    forwarded.as_object_mut().unwrap().remove("selectedTools");
    assert_eq!(forwarded, serde_json::from_str::<Value>(body).unwrap());
}

#[tokio::test]
async fn provider_failure_returns_details_with_cors_headers() {
    let voice_ai = spawn_mock(VOICE_AI_PATH, StatusCode::BAD_REQUEST, r#"{"voice":["unknown voice"]}"#).await;
    let dead = dead_base().await;
    let state = build_test_state(&voice_ai.base, &dead, &[("ULTRAVOX_API_KEY_1", "k")]);

    let response = app(state)
        .oneshot(session_request("http://localhost:3002", r#"{"voice":"nobody"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3002"
    );
    let body = json_body(response).await;
    assert_eq!(body["error"], "Error calling voice-AI API");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("400"));
    assert!(details.contains("unknown voice"));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request_with_cors_headers() {
    let dead = dead_base().await;
    let state = build_test_state(&dead, &dead, &[("ULTRAVOX_API_KEY_1", "k")]);

    let response = app(state)
        .oneshot(session_request("https://unknown.example", r#"{"selectedTools": 5}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://genie.elyxa.dev"
    );
    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn missing_credentials_is_a_server_error() {
    let voice_ai = spawn_mock(VOICE_AI_PATH, StatusCode::CREATED, PROVIDER_REPLY).await;
    let dead = dead_base().await;
    let state = build_test_state(&voice_ai.base, &dead, &[]);

    let response = app(state)
        .oneshot(session_request("http://localhost:3000", r#"{}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["details"].as_str().unwrap().contains("no voice-AI API keys"));
    assert_eq!(voice_ai.hits(), 0);
}

#[tokio::test]
async fn missing_content_type_is_a_bad_request() {
    let voice_ai = spawn_mock(VOICE_AI_PATH, StatusCode::CREATED, PROVIDER_REPLY).await;
    let dead = dead_base().await;
    let state = build_test_state(&voice_ai.base, &dead, &[("ULTRAVOX_API_KEY_1", "k")]);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/direct-session")
        .header(header::ORIGIN, "http://localhost:3001")
        .body(Body::from(r#"{"systemPrompt":"hi"}"#))
        .unwrap();
    let response = app(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3001"
    );
    assert_eq!(json_body(response).await["error"], "Invalid session configuration");
    assert_eq!(voice_ai.hits(), 0);
}
