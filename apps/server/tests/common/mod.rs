#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use finboard_ai::{AiError, ChatService, GenerateContentRequest, LlmClient, LlmResponse};
use finboard_server::{
    api::app_router,
    config::{Config, ProviderKeys},
    proxy::{Clock, ProxyCache, ProxyError, ProxyService, UpstreamClient, UpstreamResponse},
    AppState,
};
use tower::ServiceExt;

/// Clock moved by hand.
#[derive(Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn advance_ms(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Upstream answering from a script, recording every URL it was asked for.
pub struct ScriptedUpstream {
    responses: Mutex<Vec<UpstreamResponse>>,
    fallback: UpstreamResponse,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl ScriptedUpstream {
    pub fn always(status: u16, body: &str) -> Arc<Self> {
        Self::scripted(Vec::new(), status, body)
    }

    /// Answer with `script` in order, then with the fallback forever.
    pub fn scripted(script: Vec<(u16, &str)>, status: u16, body: &str) -> Arc<Self> {
        let mut responses: Vec<UpstreamResponse> = script
            .into_iter()
            .map(|(status, body)| UpstreamResponse {
                status,
                body: body.to_string(),
            })
            .collect();
        responses.reverse();
        Arc::new(Self {
            responses: Mutex::new(responses),
            fallback: UpstreamResponse {
                status,
                body: body.to_string(),
            },
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for ScriptedUpstream {
    async fn get(&self, url: &reqwest::Url) -> Result<UpstreamResponse, ProxyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        let next = self.responses.lock().unwrap().pop();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}

/// LLM that always answers with the same response.
pub struct FixedLlm(pub LlmResponse);

#[async_trait]
impl LlmClient for FixedLlm {
    async fn generate(&self, _request: &GenerateContentRequest) -> Result<LlmResponse, AiError> {
        Ok(self.0.clone())
    }
}

/// LLM that answers only after a delay.
pub struct SlowLlm(pub Duration);

#[async_trait]
impl LlmClient for SlowLlm {
    async fn generate(&self, _request: &GenerateContentRequest) -> Result<LlmResponse, AiError> {
        tokio::time::sleep(self.0).await;
        Ok(LlmResponse {
            status: 200,
            body: serde_json::Value::Null,
        })
    }
}

pub fn test_config() -> Config {
    Config {
        keys: ProviderKeys {
            alpha_vantage_key: Some("av-test-key".to_string()),
            finnhub_key: Some("fh-test-key".to_string()),
            gemini_key: None,
        },
        ..Config::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub upstream: Arc<ScriptedUpstream>,
    pub clock: Arc<ManualClock>,
}

pub fn build_app(config: Config, upstream: Arc<ScriptedUpstream>, llm: Arc<dyn LlmClient>) -> TestApp {
    let clock = Arc::new(ManualClock::default());
    clock.advance_ms(1_700_000_000_000);
    let proxy = ProxyService::new(
        &config,
        Arc::new(ProxyCache::new()),
        upstream.clone(),
        clock.clone(),
    );
    let state = AppState::new(proxy, ChatService::new(llm));
    TestApp {
        router: app_router(state, &config),
        upstream,
        clock,
    }
}

pub fn proxy_app(upstream: Arc<ScriptedUpstream>) -> TestApp {
    let llm = Arc::new(FixedLlm(LlmResponse {
        status: 200,
        body: serde_json::Value::Null,
    }));
    build_app(test_config(), upstream, llm)
}

pub async fn post_json(router: &Router, uri: &str, body: serde_json::Value) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
