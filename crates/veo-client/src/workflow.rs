use tracing::{error, info};
use veo_preprocess::{BatchOutcome, ImageSet, ProcessedImage, SourceImage};
use veo_types::{AspectRatio, GenerateVideoRequest};

use crate::error::ClientError;
use crate::locator::GenerationResult;
use crate::relay::VideoRelay;

/// Where the current generation cycle stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenerationStatus {
    #[default]
    Idle,
    /// Compressing the images that go with this submission.
    Preparing,
    /// The relay call is in flight.
    Generating,
    Success(GenerationResult),
    Error(String),
}

impl GenerationStatus {
    /// Submissions are locked out while a cycle is running.
    pub fn can_submit(&self) -> bool {
        !matches!(self, GenerationStatus::Preparing | GenerationStatus::Generating)
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            GenerationStatus::Success(result) => Some(result),
            _ => None,
        }
    }
}

/// One user's generation session: held images, prompt, ratio and status.
#[derive(Debug, Default)]
pub struct Workflow {
    images: ImageSet,
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    status: GenerationStatus,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    pub fn images(&self) -> &[ProcessedImage] {
        self.images.images()
    }

    pub fn can_submit(&self) -> bool {
        self.status.can_submit()
    }

    /// Add a batch of selected files. Over the cap, nothing changes and the
    /// warning comes back as the error.
    pub async fn add_images(&mut self, files: Vec<SourceImage>) -> Result<BatchOutcome, ClientError> {
        Ok(self.images.add_batch(files).await?)
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ProcessedImage> {
        self.images.remove(index)
    }

    /// Run one generation cycle.
    ///
    /// `new_files` are compressed first and awaited as a single batch; the
    /// relay is only called once every file has settled. A file that fails
    /// to process is left out and reported in [`GenerationResult::failed`]
    /// (non-images in [`GenerationResult::skipped`]). The outcome is also
    /// recorded in [`status`](Self::status).
    pub async fn generate<R>(
        &mut self,
        relay: &R,
        new_files: Vec<SourceImage>,
    ) -> Result<GenerationResult, ClientError>
    where
        R: VideoRelay + ?Sized,
    {
        if self.prompt.is_empty() {
            return Err(ClientError::EmptyPrompt);
        }
        if !self.can_submit() {
            return Err(ClientError::Busy);
        }

        self.status = GenerationStatus::Preparing;
        let batch = if new_files.is_empty() {
            BatchOutcome::default()
        } else {
            match self.images.add_batch(new_files).await {
                Ok(batch) => batch,
                Err(e) => return Err(self.fail(e.into())),
            }
        };

        self.status = GenerationStatus::Generating;
        let urls = self.images.data_urls();
        let request = GenerateVideoRequest {
            prompt: Some(self.prompt.clone()),
            images: (!urls.is_empty()).then_some(urls),
            password: None,
            aspect_ratio: Some(self.aspect_ratio.as_str().to_owned()),
        };

        let outcome = match relay.generate(&request).await {
            Ok(response) => GenerationResult::from_prediction(response.prediction),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(mut result) => {
                result.skipped = batch.skipped;
                result.failed = batch.failed.iter().map(ToString::to_string).collect();
                info!(
                    video_url = %result.video_url,
                    dropped = result.skipped.len() + result.failed.len(),
                    "generation succeeded"
                );
                self.status = GenerationStatus::Success(result.clone());
                Ok(result)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Start over: no images, no prompt, no result.
    pub fn reset(&mut self) {
        self.images.clear();
        self.prompt.clear();
        self.status = GenerationStatus::Idle;
    }

    fn fail(&mut self, e: ClientError) -> ClientError {
        error!(error = %e, "generation failed");
        self.status = GenerationStatus::Error(e.to_string());
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::{ImageFormat, RgbImage};
    use serde_json::{Value, json};
    use std::io::Cursor;
    use std::sync::Mutex;
    use veo_types::GenerateVideoResponse;

    /// Replies with a canned prediction (or error) and keeps every request.
    struct FakeRelay {
        reply: Result<Value, String>,
        seen: Mutex<Vec<GenerateVideoRequest>>,
    }

    impl FakeRelay {
        fn ok(prediction: Value) -> Self {
            Self {
                reply: Ok(prediction),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_owned()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<GenerateVideoRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VideoRelay for FakeRelay {
        async fn generate(
            &self,
            request: &GenerateVideoRequest,
        ) -> Result<GenerateVideoResponse, ClientError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(prediction) => Ok(GenerateVideoResponse {
                    prediction: prediction.clone(),
                }),
                Err(message) => Err(ClientError::Relay {
                    status: 500,
                    message: message.clone(),
                    details: None,
                    code: None,
                }),
            }
        }
    }

    fn png(name: &str, w: u32, h: u32) -> SourceImage {
        let mut buf = Cursor::new(Vec::new());
        RgbImage::new(w, h)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        SourceImage::new(name, "image/png", buf.into_inner())
    }

    fn workflow(prompt: &str) -> Workflow {
        Workflow {
            prompt: prompt.to_owned(),
            ..Workflow::new()
        }
    }

    #[tokio::test]
    async fn images_are_compressed_before_the_call() {
        let relay = FakeRelay::ok(json!({ "videoUri": "https://v/1.mp4" }));
        let mut wf = workflow("a cat on a skateboard");
        wf.aspect_ratio = AspectRatio::Portrait;
        wf.add_images(vec![png("a.png", 16, 16)]).await.unwrap();

        let result = wf
            .generate(&relay, vec![png("b.png", 2048, 1024), png("c.png", 8, 8)])
            .await
            .unwrap();
        assert_eq!(result.video_url, "https://v/1.mp4");
        assert_eq!(wf.status().result(), Some(&result));

        let calls = relay.calls();
        assert_eq!(calls.len(), 1);
        let images = calls[0].images.as_ref().unwrap();
        assert_eq!(images.len(), 3);
        assert!(images.iter().all(|i| i.starts_with("data:image/jpeg;base64,")));
        assert_eq!(calls[0].aspect_ratio.as_deref(), Some("9:16"));
        assert_eq!(wf.images()[1].width, 1024);
    }

    #[tokio::test]
    async fn undecodable_file_is_reported_with_the_result() {
        let relay = FakeRelay::ok(json!({ "videoUri": "https://v/2.mp4" }));
        let mut wf = workflow("p");
        let corrupt = SourceImage::new("bad.png", "image/png", vec![1, 2, 3]);
        let notes = SourceImage::new("notes.txt", "text/plain", b"hi".to_vec());

        let result = wf
            .generate(&relay, vec![png("a.png", 4, 4), corrupt, notes])
            .await
            .unwrap();

        assert_eq!(result.failed.len(), 1);
        assert!(result.failed[0].contains("bad.png"), "{:?}", result.failed);
        assert_eq!(result.skipped, vec!["notes.txt".to_owned()]);
        assert_eq!(wf.status().result(), Some(&result));
        assert_eq!(relay.calls()[0].images.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn text_only_request_carries_no_images() {
        let relay = FakeRelay::ok(json!({ "videoUri": "https://v" }));
        let mut wf = workflow("sunrise");
        wf.generate(&relay, Vec::new()).await.unwrap();
        let call = &relay.calls()[0];
        assert_eq!(call.images, None);
        assert_eq!(call.aspect_ratio.as_deref(), Some("16:9"));
    }

    #[tokio::test]
    async fn empty_prompt_never_calls_the_relay() {
        let relay = FakeRelay::ok(json!({}));
        let mut wf = workflow("");
        let err = wf.generate(&relay, Vec::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyPrompt));
        assert_eq!(wf.status(), &GenerationStatus::Idle);
        assert!(relay.calls().is_empty());
    }

    #[tokio::test]
    async fn over_the_cap_fails_before_the_call() {
        let relay = FakeRelay::ok(json!({ "videoUri": "https://v" }));
        let mut wf = workflow("p");
        wf.add_images(vec![png("a.png", 4, 4), png("b.png", 4, 4)])
            .await
            .unwrap();

        let err = wf
            .generate(&relay, vec![png("c.png", 4, 4), png("d.png", 4, 4)])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Máximo 3 imágenes permitidas.");
        assert_eq!(wf.images().len(), 2);
        assert!(matches!(wf.status(), GenerationStatus::Error(_)));
        assert!(relay.calls().is_empty());
    }

    #[tokio::test]
    async fn relay_errors_land_in_status_and_allow_resubmit() {
        let relay = FakeRelay::failing("Quota exceeded");
        let mut wf = workflow("p");
        wf.generate(&relay, Vec::new()).await.unwrap_err();
        assert_eq!(wf.status(), &GenerationStatus::Error("Quota exceeded".into()));
        assert!(wf.can_submit());
    }

    #[tokio::test]
    async fn prediction_without_video_is_an_error() {
        let relay = FakeRelay::ok(json!({ "raiFilteredReason": "blocked" }));
        let mut wf = workflow("p");
        let err = wf.generate(&relay, Vec::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::NoVideoLocator));
        assert_eq!(
            wf.status(),
            &GenerationStatus::Error("No video URI in response".into())
        );
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let relay = FakeRelay::ok(json!({ "videoUri": "https://v" }));
        let mut wf = workflow("p");
        wf.generate(&relay, vec![png("a.png", 4, 4)]).await.unwrap();
        wf.reset();
        assert_eq!(wf.status(), &GenerationStatus::Idle);
        assert!(wf.images().is_empty());
        assert!(wf.prompt.is_empty());
    }

    #[test]
    fn submit_is_locked_while_running() {
        assert!(GenerationStatus::Idle.can_submit());
        assert!(!GenerationStatus::Preparing.can_submit());
        assert!(!GenerationStatus::Generating.can_submit());
        assert!(GenerationStatus::Error("x".into()).can_submit());
    }
}
