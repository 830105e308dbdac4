use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use veo_types::ErrorCode;

/// Errors returned by Vertex AI operations.
#[derive(Debug, Error)]
pub enum VertexError {
    /// No usable credentials, or a key that cannot be used.
    #[error("{0}")]
    Credentials(String),

    /// The service-account assertion could not be signed.
    #[error("failed to sign service-account assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The OAuth token endpoint refused the assertion.
    #[error("token exchange failed: {0}")]
    Token(String),

    /// Transport failure (DNS, TLS, timeout, connection reset, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
        details: Option<String>,
    },

    /// A successful call carried an empty `predictions` array.
    #[error("No predictions returned")]
    NoPredictions,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VertexError {
    /// Machine-readable code, when the remote side supplied one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            VertexError::Api { code, .. } => code.clone(),
            VertexError::Http(e) => e.status().map(|s| ErrorCode::Number(i64::from(s.as_u16()))),
            _ => None,
        }
    }

    /// Extra detail, e.g. the Google status string `RESOURCE_EXHAUSTED`.
    pub fn details(&self) -> Option<String> {
        match self {
            VertexError::Api { details, .. } => details.clone(),
            _ => None,
        }
    }

    /// Quota errors are reported by Google as HTTP 429 / `RESOURCE_EXHAUSTED`.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, VertexError::Api { status: 429, .. })
            || self.details().as_deref() == Some("RESOURCE_EXHAUSTED")
    }
}

// ── Google error envelope ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Build a [`VertexError::Api`] from a non-2xx response.
///
/// Google APIs wrap failures as `{"error": {"code", "message", "status"}}`;
/// anything else is kept verbatim in `details`.
pub(crate) fn api_error(status: StatusCode, body: &str) -> VertexError {
    let fallback_message = format!("HTTP {}", status.as_u16());
    match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(GoogleErrorEnvelope { error }) => VertexError::Api {
            status: status.as_u16(),
            code: Some(ErrorCode::Number(
                error.code.unwrap_or_else(|| i64::from(status.as_u16())),
            )),
            message: error.message.unwrap_or(fallback_message),
            details: error.status,
        },
        Err(_) => {
            let body = body.trim();
            VertexError::Api {
                status: status.as_u16(),
                code: Some(ErrorCode::Number(i64::from(status.as_u16()))),
                message: fallback_message,
                details: (!body.is_empty()).then(|| body.to_owned()),
            }
        }
    }
}
