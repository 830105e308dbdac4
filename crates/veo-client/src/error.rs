use std::path::PathBuf;

use thiserror::Error;
use veo_preprocess::PreprocessError;
use veo_types::ErrorCode;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Submission attempted without a prompt.
    #[error("Prompt is required")]
    EmptyPrompt,

    /// A generation is already being prepared or is in flight.
    #[error("a generation is already in progress")]
    Busy,

    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    /// The relay answered with a non-2xx status.
    #[error("{message}")]
    Relay {
        status: u16,
        message: String,
        details: Option<String>,
        code: Option<ErrorCode>,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No video URI in response")]
    NoVideoLocator,

    #[error("cannot download {0}: Cloud Storage locators need a signed URL")]
    UnsupportedLocator(String),

    #[error("malformed data URL: {0}")]
    DataUrl(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
