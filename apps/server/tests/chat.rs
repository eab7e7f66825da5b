mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, build_app, post_json, test_config, FixedLlm, ScriptedUpstream, SlowLlm};
use finboard_ai::{GeminiClient, LlmResponse};
use serde_json::json;

fn chat_body() -> serde_json::Value {
    json!({
        "messages": [{"role": "user", "content": "What is on my dashboard?"}],
        "dashboardContext": {"widgets": [{"title": "Apple", "provider": "finnhub"}]}
    })
}

#[tokio::test]
async fn returns_model_reply() {
    let llm = Arc::new(FixedLlm(LlmResponse {
        status: 200,
        body: json!({"candidates": [{"content": {"parts": [{"text": "An Apple quote card."}]}}]}),
    }));
    let app = build_app(test_config(), ScriptedUpstream::always(200, "{}"), llm);

    let response = post_json(&app.router, "/api/chat", chat_body()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"reply": "An Apple quote card."})
    );
}

#[tokio::test]
async fn provider_throttling_is_a_friendly_reply() {
    let llm = Arc::new(FixedLlm(LlmResponse {
        status: 429,
        body: json!({"error": {"code": 429, "message": "Resource exhausted"}}),
    }));
    let app = build_app(test_config(), ScriptedUpstream::always(200, "{}"), llm);

    let response = post_json(&app.router, "/api/chat", chat_body()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let reply = body_json(response).await["reply"].as_str().unwrap().to_string();
    assert!(reply.contains("currently at capacity"));
}

#[tokio::test]
async fn missing_gemini_key_is_a_server_error() {
    let llm = Arc::new(GeminiClient::new(reqwest::Client::new(), None));
    let app = build_app(test_config(), ScriptedUpstream::always(200, "{}"), llm);

    let response = post_json(&app.router, "/api/chat", chat_body()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing GEMINI_API_KEY"})
    );
}

#[tokio::test]
async fn slow_request_times_out_with_json_envelope() {
    let config = finboard_server::config::Config {
        request_timeout: Duration::from_millis(20),
        ..test_config()
    };
    let llm = Arc::new(SlowLlm(Duration::from_secs(5)));
    let app = build_app(config, ScriptedUpstream::always(200, "{}"), llm);

    let response = post_json(&app.router, "/api/chat", chat_body()).await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Request timed out", "status": 408})
    );
}
