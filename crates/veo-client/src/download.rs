use std::path::Path;

use base64::Engine as _;
use reqwest::Client;
use tracing::info;

use crate::error::ClientError;

pub const DEFAULT_VIDEO_FILE_NAME: &str = "veo-generated-video.mp4";

/// Save the video at `locator` to `dest`, returning the number of bytes
/// written.
///
/// `http(s)` URLs are fetched, `data:` URLs are decoded in place. `gs://`
/// locators are refused: reading them needs credentials the client does not
/// have.
pub async fn download_video(http: &Client, locator: &str, dest: &Path) -> Result<u64, ClientError> {
    if locator.starts_with("gs://") {
        return Err(ClientError::UnsupportedLocator(locator.to_owned()));
    }

    let bytes = if let Some(rest) = locator.strip_prefix("data:") {
        let (_, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| ClientError::DataUrl("expected ;base64, payload".into()))?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ClientError::DataUrl(e.to_string()))?
    } else {
        http.get(locator)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    };

    tokio::fs::write(dest, &bytes)
        .await
        .map_err(|source| ClientError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
    info!(path = %dest.display(), bytes = bytes.len(), "video saved");
    Ok(bytes.len() as u64)
}

/// What a share sheet gets for a generated video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareMessage {
    pub fn for_video(url: impl Into<String>) -> Self {
        Self {
            title: "My Veo Video".to_owned(),
            text: "Check out this video generated with Google Veo!".to_owned(),
            url: url.into(),
        }
    }
}
