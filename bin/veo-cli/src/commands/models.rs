use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use veo_vertex::{
    Credentials, ModelEndpoint, PublisherModel, ServiceAccountKey, VertexClient, is_video_model,
    resolve_project_id,
};

/// Shown when no video model matches, to prove the connection works.
const FALLBACK_LISTING: usize = 10;

#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Service-account key JSON
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_JSON", hide_env_values = true)]
    pub service_account_json: Option<String>,

    /// Project to bill; defaults to the key's own project
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT_ID")]
    pub project: Option<String>,

    /// Pre-minted access token, used when no key is given
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}

pub async fn run(args: ModelsArgs) -> Result<()> {
    let key = args
        .service_account_json
        .as_deref()
        .map(ServiceAccountKey::from_json)
        .transpose()
        .context("GOOGLE_SERVICE_ACCOUNT_JSON is not a valid service-account key")?;
    let project = resolve_project_id(args.project.as_deref(), key.as_ref());
    let credentials = match (key, args.access_token) {
        (Some(key), _) => Credentials::ServiceAccount(key),
        (None, Some(token)) => Credentials::AccessToken(token),
        (None, None) => anyhow::bail!(
            "set GOOGLE_SERVICE_ACCOUNT_JSON or GOOGLE_OAUTH_ACCESS_TOKEN to list models"
        ),
    };

    println!("Authenticating with project: {project}");
    let client = VertexClient::new(
        ModelEndpoint::veo(project),
        credentials,
        Duration::from_secs(60),
    )?;
    let models = client
        .list_publisher_models()
        .await
        .context("listing publisher models failed; is the Vertex AI API enabled?")?;

    let (matched, shown) = select_models(&models);
    if matched {
        for model in shown {
            println!(" - Found: {} (ID: {})", model.name, model.model_id());
        }
    } else {
        println!(
            "No video models found. First {FALLBACK_LISTING} models, to verify the connection:"
        );
        for model in shown {
            println!(" - {}", model.model_id());
        }
    }
    Ok(())
}

/// Video models if there are any (`true`), else the first few of everything.
fn select_models(models: &[PublisherModel]) -> (bool, Vec<&PublisherModel>) {
    let video: Vec<_> = models.iter().filter(|m| is_video_model(m)).collect();
    if video.is_empty() {
        (false, models.iter().take(FALLBACK_LISTING).collect())
    } else {
        (true, video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str) -> PublisherModel {
        PublisherModel {
            name: format!("publishers/google/models/{id}"),
            version_id: None,
            launch_stage: None,
        }
    }

    #[test]
    fn video_models_are_preferred() {
        let models = [model("gemini-2.5-pro"), model("veo-2.0-generate-001"), model("imagen-4")];
        let (matched, shown) = select_models(&models);
        assert!(matched);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].model_id(), "veo-2.0-generate-001");
    }

    #[test]
    fn falls_back_to_first_ten() {
        let models: Vec<_> = (0..15).map(|i| model(&format!("text-{i}"))).collect();
        let (matched, shown) = select_models(&models);
        assert!(!matched);
        assert_eq!(shown.len(), FALLBACK_LISTING);
        assert_eq!(shown[0].model_id(), "text-0");
    }
}
