use futures::future::join_all;
use tracing::debug;

use crate::error::PreprocessError;
use crate::resize::process_image;
use crate::source::{ProcessedImage, SourceImage};

/// Process every file on its own blocking worker and wait for all of them.
///
/// Results come back in input order. A failure is reported in its own slot
/// and does not affect any other file in the batch.
pub async fn process_batch(files: Vec<SourceImage>) -> Vec<Result<ProcessedImage, PreprocessError>> {
    debug!(count = files.len(), "processing image batch");
    let workers = files.into_iter().map(|file| async move {
        let name = file.name.clone();
        tokio::task::spawn_blocking(move || process_image(&file))
            .await
            .unwrap_or_else(|e| {
                Err(PreprocessError::Task {
                    name,
                    message: e.to_string(),
                })
            })
    });
    join_all(workers).await
}
