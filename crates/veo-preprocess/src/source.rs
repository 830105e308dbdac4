use std::path::Path;

use image::ImageFormat;

use crate::error::PreprocessError;

/// A file as the user selected or dropped it, before any processing.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    /// MIME type as reported by the picker, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring its content type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, PreprocessError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PreprocessError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content_type_for(path), bytes))
    }

    /// Whether the picker reported an `image/*` type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

fn content_type_for(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// An image after downscaling and JPEG re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// `data:image/jpeg;base64,...`
    pub data_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("cat.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("dog.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn only_image_types_count_as_images() {
        assert!(SourceImage::new("a.webp", "image/webp", vec![]).is_image());
        assert!(!SourceImage::new("a.pdf", "application/pdf", vec![]).is_image());
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let err = SourceImage::from_path("/definitely/not/here.png")
            .await
            .unwrap_err();
        assert!(matches!(err, PreprocessError::Io { ref path, .. } if path.ends_with("here.png")));
    }
}
