//! Chat service: builds the Gemini request from the conversation and
//! dashboard context, and turns provider failures into a friendly reply.

use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use crate::error::AiError;
use crate::gemini::{GenerateContentRequest, LlmClient, LlmResponse};
use crate::prompt::build_context_prompt;
use crate::types::{ChatReply, ChatRequest};

pub const APOLOGY_REPLY: &str = "I'm sorry, I couldn't generate a response.";
pub const CAPACITY_REPLY: &str =
    "⚠️ The AI service is currently at capacity. Please try again in a moment.";
pub const KEY_CONFIG_REPLY: &str =
    "⚠️ API key configuration issue. Please check your Gemini API settings.";

pub struct ChatService {
    client: Arc<dyn LlmClient>,
}

impl ChatService {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Answer the conversation.
    ///
    /// Errors are reserved for missing configuration and unreachable
    /// providers; anything the provider itself reports comes back as a reply.
    pub async fn reply(&self, request: ChatRequest) -> Result<ChatReply, AiError> {
        let preamble = build_context_prompt(request.dashboard_context.as_ref());
        let generate = GenerateContentRequest::from_history(&preamble, &request.messages);

        let response = self.client.generate(&generate).await?;
        if !response.is_success() {
            warn!(
                "Gemini returned {}: {}",
                response.status,
                response.body.get("error").unwrap_or(&Value::Null)
            );
            return Ok(ChatReply {
                reply: friendly_error_reply(&response),
            });
        }

        let reply = match response.first_text() {
            Some(text) => text.to_string(),
            None => {
                info!("Gemini response had no text candidate");
                APOLOGY_REPLY.to_string()
            }
        };
        Ok(ChatReply { reply })
    }
}

/// User-facing message for a failed provider call.
pub fn friendly_error_reply(response: &LlmResponse) -> String {
    let error = response.body.get("error");
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_u64)
        .unwrap_or(u64::from(response.status));

    match code {
        429 => CAPACITY_REPLY.to_string(),
        403 => KEY_CONFIG_REPLY.to_string(),
        _ => error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(|m| format!("⚠️ {}", m))
            .unwrap_or_else(|| APOLOGY_REPLY.to_string()),
    }
}
