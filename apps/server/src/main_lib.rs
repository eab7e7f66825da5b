use std::sync::Arc;

use finboard_ai::{ChatService, GeminiClient, LlmClient};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    config::Config,
    proxy::{HttpUpstream, ProxyCache, ProxyService, SystemClock},
};

pub struct AppState {
    pub proxy: Arc<ProxyService>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(proxy: ProxyService, chat: ChatService) -> Arc<Self> {
        Arc::new(Self {
            proxy: Arc::new(proxy),
            chat: Arc::new(chat),
        })
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("FINBOARD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let cache = Arc::new(ProxyCache::new());
    let upstream = Arc::new(HttpUpstream::new(config.upstream_timeout)?);
    let proxy = ProxyService::new(config, cache, upstream, Arc::new(SystemClock));

    let http = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()?;
    let gemini: Arc<dyn LlmClient> = Arc::new(
        GeminiClient::new(http, config.keys.gemini_key.clone()).with_base_url(&config.gemini_url),
    );
    let chat = ChatService::new(gemini);

    tracing::info!("Provider keys: {:?}", config.keys);
    Ok(AppState::new(proxy, chat))
}
