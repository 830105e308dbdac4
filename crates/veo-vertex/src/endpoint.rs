use crate::auth::ServiceAccountKey;

/// Regional Vertex AI host the model is served from.
pub const API_BASE_URL: &str = "https://us-central1-aiplatform.googleapis.com";
pub const LOCATION: &str = "us-central1";
pub const PUBLISHER: &str = "google";
pub const MODEL_ID: &str = "veo-3.1-fast-generate-001";
/// Placeholder used when no project can be determined; calls will fail
/// upstream with a descriptive error rather than locally.
pub const DEFAULT_PROJECT_ID: &str = "your-project-id";

/// Fully-qualified address of a publisher model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEndpoint {
    pub base_url: String,
    pub project: String,
    pub location: String,
    pub publisher: String,
    pub model: String,
}

impl ModelEndpoint {
    /// The Veo model in `us-central1` for `project`.
    pub fn veo(project: impl Into<String>) -> Self {
        Self {
            base_url: API_BASE_URL.to_owned(),
            project: project.into(),
            location: LOCATION.to_owned(),
            publisher: PUBLISHER.to_owned(),
            model: MODEL_ID.to_owned(),
        }
    }

    /// Point at a different host, keeping the resource path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// `projects/{p}/locations/{l}/publishers/{pub}/models/{m}`
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/publishers/{}/models/{}",
            self.project, self.location, self.publisher, self.model
        )
    }

    pub fn predict_url(&self) -> String {
        format!("{}/v1/{}:predict", self.base_url, self.resource_name())
    }

    /// Listing endpoint for every model the publisher exposes.
    pub fn publisher_models_url(&self) -> String {
        format!("{}/v1beta1/publishers/{}/models", self.base_url, self.publisher)
    }
}

/// Pick the project id: explicit setting, then the key's own project, then
/// [`DEFAULT_PROJECT_ID`].
pub fn resolve_project_id(explicit: Option<&str>, key: Option<&ServiceAccountKey>) -> String {
    explicit
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .or_else(|| key.and_then(|k| k.project_id.clone()))
        .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_owned())
}
