//! Wire shapes of the Vertex AI `:predict` call for Veo.
//!
//! The remote schema is not ours: `image_input_config` and `aspect_ratio`
//! are snake_case while everything else is camelCase, and both must be
//! reproduced exactly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use veo_types::{AspectRatio, strip_data_url_header};

use crate::error::VertexError;

/// Samples per request. One generation, one video.
pub const SAMPLE_COUNT: u32 = 1;
/// Length of the generated clip.
pub const DURATION_SECONDS: u32 = 5;
pub const FRAMES_PER_SECOND: u32 = 24;

/// Body of `POST .../models/{model}:predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

impl PredictRequest {
    /// A request carrying exactly one instance.
    pub fn single(instance: PredictInstance, parameters: PredictParameters) -> Self {
        Self {
            instances: vec![instance],
            parameters,
        }
    }
}

/// One generation prompt plus its optional reference images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictInstance {
    pub prompt: String,
    /// Omitted entirely when there are no reference images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_input_config: Option<ImageInputConfig>,
}

impl PredictInstance {
    /// Build an instance, stripping any `data:image/...;base64,` header from
    /// the images and keeping their order.
    pub fn new<S: AsRef<str>>(prompt: impl Into<String>, images: &[S]) -> Self {
        let image_input_config = (!images.is_empty()).then(|| ImageInputConfig {
            images: images
                .iter()
                .map(|img| ImageBytes {
                    image_bytes: strip_data_url_header(img.as_ref()).to_owned(),
                })
                .collect(),
        });
        Self {
            prompt: prompt.into(),
            image_input_config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInputConfig {
    pub images: Vec<ImageBytes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBytes {
    #[serde(rename = "imageBytes")]
    pub image_bytes: String,
}

/// Generation parameters. Everything but the aspect ratio is fixed; audio is
/// always off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictParameters {
    #[serde(rename = "sampleCount")]
    pub sample_count: u32,
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: u32,
    pub fps: u32,
    pub aspect_ratio: AspectRatio,
    #[serde(rename = "enableAudio")]
    pub enable_audio: bool,
}

impl PredictParameters {
    pub fn new(aspect_ratio: AspectRatio) -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            duration_seconds: DURATION_SECONDS,
            fps: FRAMES_PER_SECOND,
            aspect_ratio,
            enable_audio: false,
        }
    }
}

/// Response of the `:predict` call. Predictions are opaque to us.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version_id: Option<String>,
}

impl PredictResponse {
    /// The first prediction, or [`VertexError::NoPredictions`].
    pub fn into_first_prediction(self) -> Result<Value, VertexError> {
        self.predictions
            .into_iter()
            .next()
            .ok_or(VertexError::NoPredictions)
    }
}
