//! Types shared between the relay server, the client workflow and the CLI.
//!
//! Field names on the wire are camelCase to match what the browser client
//! has always sent (`aspectRatio`), while the remote prediction schema lives
//! in `veo-vertex` with its own, fixed, naming.

pub mod data_url;
pub mod error;
pub mod video;

pub use data_url::{MAX_IMAGES, encode_data_url, strip_data_url_header};
pub use error::TypesError;
pub use video::{AspectRatio, ErrorBody, ErrorCode, GenerateVideoRequest, GenerateVideoResponse};
