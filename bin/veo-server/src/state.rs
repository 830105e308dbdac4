//! Shared application state injected into every Axum handler.

use std::fmt;
use std::sync::Arc;

use veo_vertex::PredictionService;

use crate::config::Config;
use crate::credential::SharedSecret;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Checked before anything else when present.
    pub secret: Option<SharedSecret>,
    /// The remote video model.
    pub predictor: Arc<dyn PredictionService>,
}

impl AppState {
    pub fn new(config: Config, predictor: Arc<dyn PredictionService>) -> Self {
        let secret = config.app_password.clone().and_then(SharedSecret::new);
        Self {
            config: Arc::new(config),
            secret,
            predictor,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}
