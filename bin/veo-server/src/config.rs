//! Server configuration, loaded from environment variables at startup.

use std::fmt;
use std::time::Duration;

use tracing::warn;
use veo_vertex::{Credentials, ServiceAccountKey};

/// Runtime configuration for veo-server.
///
/// Every field has a default so the server starts with no environment set;
/// without credentials it still serves validation errors, and only the
/// remote call fails.
#[derive(Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated allowed origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Mount Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// Largest accepted request body. Three base64 JPEGs fit comfortably.
    pub max_body_bytes: usize,

    /// Bound on the whole remote round trip.
    pub request_timeout_secs: u64,

    /// Shared secret callers must send as `password`.
    pub app_password: Option<String>,

    /// Raw service-account key JSON.
    pub service_account_json: Option<String>,

    /// Overrides the project named in the service-account key.
    pub project_id: Option<String>,

    /// Pre-minted OAuth2 access token, used when no key is configured.
    pub access_token: Option<String>,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Unset and empty are the same thing for every optional setting.
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_address: non_empty("VEO_BIND").unwrap_or_else(|| "0.0.0.0:3000".to_owned()),
            log_level: non_empty("VEO_LOG").unwrap_or_else(|| "info".to_owned()),
            log_json: non_empty("VEO_LOG_JSON").is_some_and(|v| parse_bool(&v)),
            cors_allowed_origins: non_empty("VEO_CORS_ORIGINS"),
            enable_swagger: non_empty("VEO_ENABLE_SWAGGER").is_none_or(|v| parse_bool(&v)),
            max_body_bytes: parse_or(non_empty("VEO_MAX_BODY_BYTES"), 25 * 1024 * 1024),
            request_timeout_secs: parse_or(non_empty("VEO_REQUEST_TIMEOUT_SECS"), 60),
            app_password: lookup("APP_PASSWORD").filter(|v| !v.is_empty()),
            service_account_json: non_empty("GOOGLE_SERVICE_ACCOUNT_JSON"),
            project_id: non_empty("GOOGLE_CLOUD_PROJECT_ID"),
            access_token: non_empty("GOOGLE_OAUTH_ACCESS_TOKEN"),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The service-account key, if one is configured and parses.
    pub fn service_account_key(&self) -> Option<ServiceAccountKey> {
        let json = self.service_account_json.as_deref()?;
        match ServiceAccountKey::from_json(json) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(error = %e, "GOOGLE_SERVICE_ACCOUNT_JSON is not a valid key; ignoring it");
                None
            }
        }
    }

    /// Credentials for the remote client: a service-account key first, then a
    /// static token, else none.
    pub fn credentials(&self, key: Option<ServiceAccountKey>) -> Credentials {
        match (key, &self.access_token) {
            (Some(key), _) => Credentials::ServiceAccount(key),
            (None, Some(token)) => Credentials::AccessToken(token.clone()),
            (None, None) => Credentials::None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("enable_swagger", &self.enable_swagger)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("app_password", &redact(&self.app_password))
            .field("service_account_json", &redact(&self.service_account_json))
            .field("project_id", &self.project_id)
            .field("access_token", &redact(&self.access_token))
            .finish()
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse_bool(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_need_no_environment() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_address, "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(!cfg.log_json);
        assert!(cfg.enable_swagger);
        assert_eq!(cfg.max_body_bytes, 26_214_400);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(60));
        assert!(cfg.app_password.is_none());
        assert!(matches!(cfg.credentials(cfg.service_account_key()), Credentials::None));
    }

    #[test]
    fn overrides_and_flags() {
        let cfg = config(&[
            ("VEO_BIND", "127.0.0.1:8080"),
            ("VEO_LOG_JSON", "TRUE"),
            ("VEO_ENABLE_SWAGGER", "false"),
            ("VEO_MAX_BODY_BYTES", "not-a-number"),
            ("APP_PASSWORD", "hunter2"),
        ]);
        assert_eq!(cfg.bind_address, "127.0.0.1:8080");
        assert!(cfg.log_json);
        assert!(!cfg.enable_swagger);
        assert_eq!(cfg.max_body_bytes, 26_214_400);
        assert_eq!(cfg.app_password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn empty_password_means_no_password() {
        assert!(config(&[("APP_PASSWORD", "")]).app_password.is_none());
    }

    #[test]
    fn broken_key_falls_back_to_static_token() {
        let cfg = config(&[
            ("GOOGLE_SERVICE_ACCOUNT_JSON", "{not json"),
            ("GOOGLE_OAUTH_ACCESS_TOKEN", "ya29.token"),
        ]);
        assert!(cfg.service_account_key().is_none());
        assert!(matches!(
            cfg.credentials(cfg.service_account_key()),
            Credentials::AccessToken(t) if t == "ya29.token"
        ));
    }

    #[test]
    fn debug_hides_secrets() {
        let cfg = config(&[
            ("APP_PASSWORD", "hunter2"),
            ("GOOGLE_OAUTH_ACCESS_TOKEN", "ya29.token"),
        ]);
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("ya29"));
    }
}
