use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use veo_types::{ErrorBody, GenerateVideoRequest, GenerateVideoResponse};

use crate::error::ClientError;

/// Path of the relay's generation endpoint.
pub const GENERATE_PATH: &str = "/api/generate-video";
/// Upper bound on one generation round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Shown when the relay fails without saying why.
const FALLBACK_ERROR: &str = "Generation failed";

/// Something that turns a generation request into a prediction.
#[async_trait]
pub trait VideoRelay: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateVideoRequest,
    ) -> Result<GenerateVideoResponse, ClientError>;
}

/// [`VideoRelay`] over HTTP against a running relay server.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    url: String,
    password: Option<String>,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("veo-client/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            url: format!("{}{GENERATE_PATH}", base_url.trim_end_matches('/')),
            password: None,
        })
    }

    /// Send `password` with every request that does not carry its own.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// The underlying HTTP client, reused for downloads.
    pub fn http(&self) -> &Client {
        &self.http
    }
}

#[async_trait]
impl VideoRelay for RelayClient {
    async fn generate(
        &self,
        request: &GenerateVideoRequest,
    ) -> Result<GenerateVideoResponse, ClientError> {
        let mut body = request.clone();
        if body.password.is_none() {
            body.password = self.password.clone();
        }
        debug!(
            url = %self.url,
            prompt_len = body.prompt.as_deref().map_or(0, str::len),
            images = body.images.as_ref().map_or(0, Vec::len),
            "submitting generation request"
        );

        let response = self.http.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let (message, details, code) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody {
                error,
                details,
                code,
            }) if !error.is_empty() => (error, details, code),
            Ok(ErrorBody { details, code, .. }) => (FALLBACK_ERROR.to_owned(), details, code),
            Err(_) => (FALLBACK_ERROR.to_owned(), None, None),
        };
        warn!(status = status.as_u16(), error = %message, "relay rejected generation");
        Err(ClientError::Relay {
            status: status.as_u16(),
            message,
            details,
            code,
        })
    }
}
