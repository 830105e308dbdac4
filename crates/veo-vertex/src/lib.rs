//! Client for Google's Vertex AI prediction API, specialised for the Veo
//! video model.
//!
//! - [`schema`] mirrors the `:predict` request/response shapes. Field names
//!   are dictated by the remote API and must not change.
//! - [`auth`] turns a service-account key into OAuth2 bearer tokens.
//! - [`PredictionService`] is the seam the relay depends on; [`VertexClient`]
//!   is the real implementation.

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod schema;
pub mod service;

pub use auth::{Credentials, ServiceAccountKey, TokenSource};
pub use client::VertexClient;
pub use endpoint::{ModelEndpoint, resolve_project_id};
pub use error::VertexError;
pub use models::{PublisherModel, is_video_model};
pub use schema::{
    ImageBytes, ImageInputConfig, PredictInstance, PredictParameters, PredictRequest,
    PredictResponse,
};
pub use service::PredictionService;
