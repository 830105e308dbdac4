//! `POST /api/generate-video`: validate, forward to the video model, return
//! its first prediction untouched.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::info;
use utoipa::OpenApi;
use veo_types::{AspectRatio, ErrorBody, ErrorCode, GenerateVideoRequest, GenerateVideoResponse};

use crate::error::ServerError;
use crate::relay;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(generate_video),
    components(schemas(
        GenerateVideoRequest,
        GenerateVideoResponse,
        AspectRatio,
        ErrorBody,
        ErrorCode
    ))
)]
pub struct GenerateApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/generate-video", post(generate_video))
}

/// Generate a video from a prompt and up to three reference images.
///
/// Makes exactly one remote call, and only after every check passed.
#[utoipa::path(
    post,
    path = "/api/generate-video",
    tag = "generation",
    request_body = GenerateVideoRequest,
    responses(
        (status = 200, description = "First prediction of the model", body = GenerateVideoResponse),
        (status = 400, description = "Missing prompt, bad aspect ratio, too many images or malformed body", body = ErrorBody),
        (status = 401, description = "Wrong or missing password", body = ErrorBody),
        (status = 500, description = "Remote model failure, passed through", body = ErrorBody),
    )
)]
pub async fn generate_video(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateVideoResponse>, ServerError> {
    let Json(body) = payload?;
    let validated = relay::validate(body, state.secret.as_ref())?;
    info!(
        prompt_len = validated.prompt.len(),
        images = validated.images.len(),
        aspect_ratio = %validated.aspect_ratio,
        "relaying generation request"
    );

    let response = state
        .predictor
        .predict(&validated.to_predict_request())
        .await?;
    let prediction = response.into_first_prediction()?;
    info!("generation succeeded");
    Ok(Json(GenerateVideoResponse { prediction }))
}
