use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use finboard_market_data::ProxyRequest;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// `POST /api/proxy`: upstream JSON with an `x-cache` header, or an error
/// envelope.
pub async fn proxy(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProxyRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let outcome = state.proxy.handle(&request).await?;
    Ok((
        [("x-cache", outcome.cache.as_str())],
        Json(outcome.data),
    )
        .into_response())
}
