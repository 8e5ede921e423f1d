//! Replaying adapter for the `ImageProvider` port.

use std::sync::{Arc, Mutex, PoisonError};

use super::replay_result;
use crate::adapters::{IMAGE_PROVIDER_PORT, REQUEST_IMAGE_METHOD};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::image_provider::{GalleryError, Image, ImageFuture, ImageProvider};

/// Answers requests with recorded outcomes, one interaction per request.
pub struct ReplayingImageProvider {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageProvider {
    /// Create a replaying provider backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }

    fn next_result(&self) -> Result<Image, GalleryError> {
        let output = {
            let mut guard = self.replayer.lock().unwrap_or_else(PoisonError::into_inner);
            guard
                .next_interaction(IMAGE_PROVIDER_PORT, REQUEST_IMAGE_METHOD)
                .map(|interaction| interaction.output.clone())
                .map_err(|e| GalleryError::Unknown(e.to_string()))?
        };
        replay_result(output)
    }
}

impl ImageProvider for ReplayingImageProvider {
    fn request_image(&self) -> ImageFuture<'_> {
        let result = self.next_result();
        Box::pin(async move { result })
    }
}
