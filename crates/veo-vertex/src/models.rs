//! Model Garden discovery: which publisher models does this project see?

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::endpoint::{DEFAULT_PROJECT_ID, ModelEndpoint};
use crate::error::{VertexError, api_error};

/// Substrings that mark a model as video-capable.
pub const VIDEO_MODEL_KEYWORDS: [&str; 4] = ["video", "veo", "move", "motion"];

const PAGE_SIZE: u32 = 100;
/// Stop following `nextPageToken` after this many pages.
const MAX_PAGES: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherModel {
    /// `publishers/google/models/{id}`
    pub name: String,
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub launch_stage: Option<String>,
}

impl PublisherModel {
    /// Last path segment of [`name`](Self::name).
    pub fn model_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// `true` when the model's resource name mentions one of
/// [`VIDEO_MODEL_KEYWORDS`], case-insensitively.
pub fn is_video_model(model: &PublisherModel) -> bool {
    let name = model.name.to_lowercase();
    VIDEO_MODEL_KEYWORDS.iter().any(|k| name.contains(k))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage {
    #[serde(default)]
    publisher_models: Vec<PublisherModel>,
    #[serde(default)]
    next_page_token: Option<String>,
}

pub(crate) async fn list_publisher_models(
    http: &Client,
    endpoint: &ModelEndpoint,
    token: &str,
) -> Result<Vec<PublisherModel>, VertexError> {
    let url = endpoint.publisher_models_url();
    let mut models = Vec::new();
    let mut page_token: Option<String> = None;

    for page in 0..MAX_PAGES {
        let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
        if let Some(t) = &page_token {
            query.push(("pageToken", t.clone()));
        }

        let mut request = http.get(&url).bearer_auth(token).query(&query);
        // Bill quota to the caller's project when we know it.
        if endpoint.project != DEFAULT_PROJECT_ID {
            request = request.header("x-goog-user-project", &endpoint.project);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        let body: ListPage = response.json().await?;
        debug!(page, count = body.publisher_models.len(), "listed publisher models");
        models.extend(body.publisher_models);

        match body.next_page_token.filter(|t| !t.is_empty()) {
            Some(next) => page_token = Some(next),
            None => return Ok(models),
        }
    }

    warn!(pages = MAX_PAGES, "publisher model listing truncated");
    Ok(models)
}
