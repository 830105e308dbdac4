//! Client-side image preprocessing.
//!
//! Selected files are filtered to images, decoded, shrunk so that neither
//! side exceeds [`MAX_IMAGE_SIDE`] pixels, and re-encoded as JPEG at
//! [`JPEG_QUALITY`]. Each file is an independent unit of work: one bad file
//! fails alone and never takes its siblings down with it.
//!
//! [`ImageSet`] holds the ordered, capped sequence a generation request is
//! built from.

pub mod batch;
pub mod error;
pub mod resize;
pub mod set;
pub mod source;

pub use batch::process_batch;
pub use error::PreprocessError;
pub use resize::{JPEG_QUALITY, MAX_IMAGE_SIDE, fit_within, process_image};
pub use set::{BatchOutcome, ImageSet};
pub use source::{ProcessedImage, SourceImage};
pub use veo_types::MAX_IMAGES;
