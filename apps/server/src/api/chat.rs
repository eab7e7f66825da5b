use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use finboard_ai::{ChatReply, ChatRequest};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// `POST /api/chat`: one assistant reply for the conversation.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let reply = state.chat.reply(request).await.map_err(|e| {
        tracing::error!(code = e.code(), "Chat request failed: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(reply))
}
