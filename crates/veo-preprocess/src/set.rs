use tracing::{info, warn};
use veo_types::MAX_IMAGES;

use crate::batch::process_batch;
use crate::error::PreprocessError;
use crate::source::{ProcessedImage, SourceImage};

/// What happened to a batch that was accepted under the cap.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Number of images appended to the set.
    pub added: usize,
    /// Names of files dropped because they were not images.
    pub skipped: Vec<String>,
    /// Per-file failures; the other files were still added.
    pub failed: Vec<PreprocessError>,
}

/// The ordered sequence of processed reference images, capped at
/// [`MAX_IMAGES`].
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    images: Vec<ProcessedImage>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process `files` and append the results after the images already held.
    ///
    /// The cap is checked against the raw number of selected files, before
    /// non-images are filtered out. When it would be exceeded the whole batch
    /// is rejected and the set is left untouched.
    pub async fn add_batch(
        &mut self,
        files: Vec<SourceImage>,
    ) -> Result<BatchOutcome, PreprocessError> {
        let held = self.images.len();
        let incoming = files.len();
        if held + incoming > MAX_IMAGES {
            warn!(held, incoming, max = MAX_IMAGES, "image cap exceeded; batch rejected");
            return Err(PreprocessError::TooManyImages {
                held,
                incoming,
                max: MAX_IMAGES,
            });
        }

        let (images, others): (Vec<_>, Vec<_>) =
            files.into_iter().partition(SourceImage::is_image);
        let mut outcome = BatchOutcome {
            skipped: others.into_iter().map(|f| f.name).collect(),
            ..Default::default()
        };

        for result in process_batch(images).await {
            match result {
                Ok(image) => {
                    self.images.push(image);
                    outcome.added += 1;
                }
                Err(e) => {
                    warn!(error = %e, "image dropped from batch");
                    outcome.failed.push(e);
                }
            }
        }

        info!(
            added = outcome.added,
            skipped = outcome.skipped.len(),
            failed = outcome.failed.len(),
            held = self.images.len(),
            "image batch processed"
        );
        Ok(outcome)
    }

    /// Remove the image at `index`, returning it if it existed.
    pub fn remove(&mut self, index: usize) -> Option<ProcessedImage> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn images(&self) -> &[ProcessedImage] {
        &self.images
    }

    /// Data URLs in insertion order, ready for the request body.
    pub fn data_urls(&self) -> Vec<String> {
        self.images.iter().map(|i| i.data_url.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Free slots left under the cap.
    pub fn remaining(&self) -> usize {
        MAX_IMAGES - self.images.len()
    }
}
