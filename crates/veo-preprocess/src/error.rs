use thiserror::Error;

/// Errors produced while preparing reference images.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Adding the batch would push the held set past the cap. Nothing was added.
    #[error("Máximo {max} imágenes permitidas.")]
    TooManyImages {
        held: usize,
        incoming: usize,
        max: usize,
    },

    /// The file claimed to be an image but could not be decoded.
    #[error("failed to decode image '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// The resized bitmap could not be re-encoded as JPEG.
    #[error("failed to encode image '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// The blocking worker for one file panicked or was cancelled.
    #[error("image worker for '{name}' did not complete: {message}")]
    Task { name: String, message: String },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
