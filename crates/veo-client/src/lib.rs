//! The generation workflow as seen from the user's side: hold up to three
//! reference images, submit one request at a time through the relay, and
//! turn the returned prediction into something playable, downloadable and
//! shareable.

pub mod download;
pub mod error;
pub mod locator;
pub mod relay;
pub mod workflow;

pub use download::{DEFAULT_VIDEO_FILE_NAME, ShareMessage, download_video};
pub use error::ClientError;
pub use locator::{GenerationResult, extract_video_locator};
pub use relay::{RelayClient, VideoRelay};
pub use workflow::{GenerationStatus, Workflow};
