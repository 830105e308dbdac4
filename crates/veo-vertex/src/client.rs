use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::auth::{Credentials, TokenSource};
use crate::endpoint::ModelEndpoint;
use crate::error::{VertexError, api_error};
use crate::models::{self, PublisherModel};
use crate::schema::{PredictRequest, PredictResponse};
use crate::service::PredictionService;

/// HTTP client for one Vertex AI publisher model.
#[derive(Debug)]
pub struct VertexClient {
    http: Client,
    endpoint: ModelEndpoint,
    tokens: TokenSource,
}

impl VertexClient {
    /// Every call, token exchange included, is bounded by `timeout`.
    pub fn new(
        endpoint: ModelEndpoint,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, VertexError> {
        let http = Client::builder()
            .user_agent(concat!("veo-vertex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            tokens: TokenSource::new(credentials, http.clone()),
            http,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &ModelEndpoint {
        &self.endpoint
    }

    /// All publisher models visible to the configured project.
    pub async fn list_publisher_models(&self) -> Result<Vec<PublisherModel>, VertexError> {
        let token = self.tokens.access_token().await?;
        models::list_publisher_models(&self.http, &self.endpoint, &token).await
    }
}

#[async_trait]
impl PredictionService for VertexClient {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, VertexError> {
        let token = self.tokens.access_token().await?;
        let url = self.endpoint.predict_url();
        debug!(
            model = %self.endpoint.model,
            instances = request.instances.len(),
            aspect_ratio = %request.parameters.aspect_ratio,
            "calling Vertex AI predict"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = api_error(status, &body);
            error!(status = status.as_u16(), error = %err, "Vertex AI predict failed");
            return Err(err);
        }

        let body: PredictResponse = response.json().await?;
        debug!(predictions = body.predictions.len(), "Vertex AI predict succeeded");
        Ok(body)
    }
}
