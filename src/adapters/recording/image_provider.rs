//! Recording adapter for the `ImageProvider` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::{IMAGE_PROVIDER_PORT, REQUEST_IMAGE_METHOD};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_provider::{ImageFuture, ImageProvider};

/// Records every answer while delegating to an inner provider.
pub struct RecordingImageProvider {
    inner: Arc<dyn ImageProvider>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageProvider {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Arc<dyn ImageProvider>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageProvider for RecordingImageProvider {
    fn request_image(&self) -> ImageFuture<'_> {
        Box::pin(async move {
            let result = self.inner.request_image().await;
            record_result(&self.recorder, IMAGE_PROVIDER_PORT, REQUEST_IMAGE_METHOD, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{GalleryError, Image};

    struct Scripted(Mutex<Vec<Result<Image, GalleryError>>>);

    impl ImageProvider for Scripted {
        fn request_image(&self) -> ImageFuture<'_> {
            let next = self.0.lock().unwrap().remove(0);
            Box::pin(async move { next })
        }
    }

    #[tokio::test]
    async fn records_successes_and_failures_in_order() {
        let inner = Arc::new(Scripted(Mutex::new(vec![
            Err(GalleryError::PermissionDenied),
            Ok(Image::new(vec![1, 2, 3], "image/png")),
        ])));
        let path = std::env::temp_dir()
            .join("avatar_recording_adapter_test")
            .join("image_provider.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "t", "c")));
        let provider = RecordingImageProvider::new(inner, Arc::clone(&recorder));

        assert_eq!(provider.request_image().await, Err(GalleryError::PermissionDenied));
        assert!(provider.request_image().await.is_ok());
        recorder.lock().unwrap().write().unwrap();

        let mut replayer = crate::cassette::config::load_cassette(&path).unwrap();
        let first = replayer.next_interaction(IMAGE_PROVIDER_PORT, REQUEST_IMAGE_METHOD).unwrap();
        assert_eq!(first.output, serde_json::json!({"Err": {"kind": "permission_denied"}}));
        let second = replayer.next_interaction(IMAGE_PROVIDER_PORT, REQUEST_IMAGE_METHOD).unwrap();
        assert_eq!(second.output["Ok"]["data"], "AQID");
        assert_eq!(second.output["Ok"]["mime_type"], "image/png");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
