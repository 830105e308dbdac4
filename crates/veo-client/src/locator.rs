use serde_json::Value;

use crate::error::ClientError;

/// A finished generation: where to find the video, plus the raw prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub video_url: String,
    pub prediction: Value,
    /// Files of this submission that were not images and were left out.
    pub skipped: Vec<String>,
    /// Files of this submission that failed to process, with the reason.
    /// The request went out with the remaining images.
    pub failed: Vec<String>,
}

impl GenerationResult {
    pub fn from_prediction(prediction: Value) -> Result<Self, ClientError> {
        let video_url = extract_video_locator(&prediction)?;
        Ok(Self {
            video_url,
            prediction,
            skipped: Vec::new(),
            failed: Vec::new(),
        })
    }
}

/// Find the video in a prediction whose exact shape the model does not
/// promise.
///
/// Tried in order: `videoUri`, `video` (string or `{uri|gcsUri}`), `gcsUri`,
/// `videos[0].gcsUri`, inline `bytesBase64Encoded` (as an mp4 data URL), and
/// finally the prediction itself when it is a bare string.
pub fn extract_video_locator(prediction: &Value) -> Result<String, ClientError> {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    let video = prediction.get("video");
    let candidates = [
        non_empty(prediction.get("videoUri")),
        non_empty(video),
        non_empty(video.and_then(|v| v.get("uri"))),
        non_empty(video.and_then(|v| v.get("gcsUri"))),
        non_empty(prediction.get("gcsUri")),
        non_empty(prediction.pointer("/videos/0/gcsUri")),
        non_empty(prediction.get("bytesBase64Encoded"))
            .map(|b64| format!("data:video/mp4;base64,{b64}")),
        non_empty(Some(prediction)),
    ];

    candidates
        .into_iter()
        .flatten()
        .next()
        .ok_or(ClientError::NoVideoLocator)
}
