use async_trait::async_trait;

use crate::error::VertexError;
use crate::schema::{PredictRequest, PredictResponse};

/// Anything that can run a `:predict` call.
///
/// The relay holds this as `Arc<dyn PredictionService>` so tests can swap in
/// a recording fake without touching the network.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, VertexError>;
}
