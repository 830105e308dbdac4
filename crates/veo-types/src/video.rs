use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::TypesError;

// ── Aspect ratio ─────────────────────────────────────────────────────────────

/// Output video shape. The model only offers these two.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum AspectRatio {
    /// `16:9`, the default when the caller does not say.
    #[default]
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    Landscape,
    /// `9:16`, vertical video for phones.
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Wire form, e.g. `"16:9"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }

    /// Parse the wire form, naming the offending value on failure.
    pub fn parse(value: &str) -> Result<Self, TypesError> {
        value
            .parse()
            .map_err(|_| TypesError::UnsupportedAspectRatio(value.to_owned()))
    }
}

// ── POST /api/generate-video ────────────────────────────────────────────────

/// Request body for `POST /api/generate-video`.
///
/// Every field is optional at the serde level: the relay reads the credential
/// from the raw body first, then parses this struct and checks prompt, aspect
/// ratio and image count in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoRequest {
    /// Text description of the video. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Up to three reference images, bare base64 or `data:image/...` URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Shared secret, checked when the server has one configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// `"16:9"` or `"9:16"`; defaults to `"16:9"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "16:9")]
    pub aspect_ratio: Option<String>,
}

/// Successful response: the first prediction, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenerateVideoResponse {
    /// Whatever the remote model returned as its first prediction.
    #[schema(value_type = Object)]
    pub prediction: serde_json::Value,
}

/// Machine-readable upstream error code; Google reports both numeric codes
/// and status strings depending on the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

/// Error envelope returned by every failing relay response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn aspect_ratio_wire_form() {
        assert_eq!(serde_json::to_value(AspectRatio::Portrait).unwrap(), json!("9:16"));
        assert_eq!(AspectRatio::Landscape.to_string(), "16:9");
        for ratio in AspectRatio::iter() {
            assert_eq!(AspectRatio::parse(ratio.as_str()), Ok(ratio));
        }
    }

    #[test]
    fn aspect_ratio_rejects_unknown_values() {
        assert_eq!(
            AspectRatio::parse("4:3"),
            Err(TypesError::UnsupportedAspectRatio("4:3".into()))
        );
    }

    #[test]
    fn request_uses_camel_case_and_tolerates_missing_fields() {
        let req: GenerateVideoRequest =
            serde_json::from_value(json!({ "prompt": "a cat", "aspectRatio": "9:16" })).unwrap();
        assert_eq!(req.prompt.as_deref(), Some("a cat"));
        assert_eq!(req.aspect_ratio.as_deref(), Some("9:16"));
        assert!(req.images.is_none());
        assert!(req.password.is_none());

        let empty: GenerateVideoRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, GenerateVideoRequest::default());
    }

    #[test]
    fn error_body_omits_absent_fields() {
        let body = ErrorBody::new("Prompt is required");
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "error": "Prompt is required" }));

        let quota = ErrorBody {
            error: "Quota exceeded".into(),
            details: Some("RESOURCE_EXHAUSTED".into()),
            code: Some(ErrorCode::Number(429)),
        };
        assert_eq!(
            serde_json::to_value(&quota).unwrap(),
            json!({ "error": "Quota exceeded", "details": "RESOURCE_EXHAUSTED", "code": 429 })
        );
    }
}
