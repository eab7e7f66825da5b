use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use finboard_ai::AiError;
use serde::Serialize;
use thiserror::Error;

use crate::proxy::ProxyError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Proxy(#[from] ProxyError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("{0}")]
    BadRequest(String),
    #[error("Request timed out")]
    Timeout,
}

/// Error envelope: `{error, status?}` plus hints for specific failures.
#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    finnhub_error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ApiError::Proxy(ProxyError::Upstream { status, body }) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                return (status, Json(body)).into_response();
            }
            ApiError::Proxy(err @ (ProxyError::CoolingDown { .. } | ProxyError::RateLimited { .. })) => {
                let retry_after = err.retry_after().map(|d| d.as_secs().max(1));
                let body = ErrorBody {
                    error: message,
                    status: Some(429),
                    retry_after,
                    ..Default::default()
                };
                let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
                if let Some(secs) = retry_after {
                    response
                        .headers_mut()
                        .insert(header::RETRY_AFTER, HeaderValue::from(secs));
                }
                return response;
            }
            ApiError::Proxy(ProxyError::AccessDenied {
                status,
                provider_error,
                ..
            }) => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    error: message,
                    status,
                    finnhub_error: provider_error,
                    ..Default::default()
                },
            ),
            ApiError::Proxy(ProxyError::UnsupportedProvider(_))
            | ApiError::Proxy(ProxyError::InvalidEndpoint(_))
            | ApiError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    ..Default::default()
                },
            ),
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                ErrorBody {
                    error: message,
                    status: Some(408),
                    ..Default::default()
                },
            ),
            ApiError::Proxy(_) | ApiError::Ai(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: message,
                    ..Default::default()
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
