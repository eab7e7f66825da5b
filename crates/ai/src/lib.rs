//! Finboard AI - dashboard-aware chat assistant.
//!
//! Forwards the conversation, prefixed with a preamble describing the user's
//! dashboard, to Gemini and returns a single reply.
//!
//! # Architecture
//!
//! - `chat`: `ChatService`, reply extraction and friendly error replies
//! - `gemini`: `generateContent` wire types, the `LlmClient` seam and `GeminiClient`
//! - `prompt`: assistant preamble and dashboard context
//! - `types`: request/response DTOs of the chat endpoint

pub mod chat;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod types;

pub use chat::ChatService;
pub use error::AiError;
pub use gemini::{GeminiClient, GenerateContentRequest, LlmClient, LlmResponse};
pub use types::{ChatMessage, ChatReply, ChatRequest, ChatRole, DashboardContext, WidgetSummary};
