//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which renders as the
//! `{ "error", "details"?, "code"? }` envelope with a matching status code.
//!
//! Upstream failures are passed through verbatim so callers can tell a quota
//! problem from a bad prompt. Internal errors are logged in full but only a
//! generic message reaches the caller.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;
use veo_types::{ErrorBody, ErrorCode};
use veo_vertex::VertexError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or wrong shared secret.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller sent an invalid or malformed request.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// The remote model call failed.
    #[error("{message}")]
    Upstream {
        message: String,
        code: Option<ErrorCode>,
        details: Option<String>,
    },

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, ErrorBody::new(m)),
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, ErrorBody::new(m)),
            ServerError::PayloadTooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, ErrorBody::new(m)),
            ServerError::Upstream {
                message,
                code,
                details,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: message,
                    details,
                    code,
                },
            ),
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<VertexError> for ServerError {
    fn from(e: VertexError) -> Self {
        error!(
            error = %e,
            code = ?e.code(),
            details = ?e.details(),
            quota = e.is_quota_exhausted(),
            "remote generation failed"
        );
        ServerError::Upstream {
            message: e.to_string(),
            code: e.code(),
            details: e.details(),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(rejection.body_text())
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    }
}
