//! Liveness plus a summary of what the relay is configured to do.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health), components(schemas(HealthReport)))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    /// Callers must send `password`.
    pub password_required: bool,
    /// A service-account key or access token is set. Without one every
    /// valid request ends in a 500 from the remote call.
    pub credentials_configured: bool,
}

/// Always 200 while the process is up; the flags never contain secrets.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, body = HealthReport))
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    let config = &state.config;
    Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        password_required: state.secret.is_some(),
        credentials_configured: config.service_account_key().is_some()
            || config.access_token.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use veo_vertex::{PredictRequest, PredictResponse, PredictionService, VertexError};

    use super::*;
    use crate::config::Config;

    struct Unused;

    #[async_trait]
    impl PredictionService for Unused {
        async fn predict(&self, _: &PredictRequest) -> Result<PredictResponse, VertexError> {
            unreachable!("health never calls the model")
        }
    }

    fn state(vars: &[(&str, &str)]) -> State<Arc<AppState>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let config = Config::from_lookup(|k| vars.get(k).cloned());
        State(Arc::new(AppState::new(config, Arc::new(Unused))))
    }

    #[tokio::test]
    async fn bare_server_reports_nothing_configured() {
        let Json(report) = get_health(state(&[])).await;
        assert_eq!(report.status, "ok");
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
        assert!(!report.password_required);
        assert!(!report.credentials_configured);
    }

    #[tokio::test]
    async fn flags_follow_the_environment_without_leaking_it() {
        let Json(report) = get_health(state(&[
            ("APP_PASSWORD", "hunter2"),
            ("GOOGLE_OAUTH_ACCESS_TOKEN", "ya29.token"),
        ]))
        .await;
        assert!(report.password_required);
        assert!(report.credentials_configured);

        let body = serde_json::to_string(&report).unwrap();
        assert!(body.contains("\"passwordRequired\":true"));
        assert!(!body.contains("hunter2"));
        assert!(!body.contains("ya29"));
    }
}
