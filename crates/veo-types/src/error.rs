use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// The caller asked for an aspect ratio the model does not offer.
    #[error("Unsupported aspect ratio: {0}")]
    UnsupportedAspectRatio(String),
}
