//! View model behind the "choose image" button.
//!
//! Every press asks the injected [`ImageProvider`] for exactly one image.
//! The outcome is republished on one of two outputs: [`AvatarViewModel::images`]
//! for successes, [`AvatarViewModel::error_messages`] for failures, already
//! translated into something a person can read.
//!
//! Presses are answered one at a time, in order. A press that arrives while
//! the provider is still busy waits its turn; nothing is dropped or merged.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::{BoxStream, Stream, StreamExt};
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::messages::ErrorMessages;
use crate::ports::{GalleryError, Image, ImageProvider};
use crate::relay::ReplayLatest;

/// Turns button presses into images or error messages.
pub struct AvatarViewModel {
    presses: mpsc::UnboundedSender<()>,
    image: ReplayLatest<Image>,
    error_message: ReplayLatest<String>,
    worker: JoinHandle<()>,
}

impl AvatarViewModel {
    /// Create a view model with the default error messages.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self::with_messages(provider, ErrorMessages::default())
    }

    /// Create a view model that uses `messages` to describe failures.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn with_messages(provider: Arc<dyn ImageProvider>, messages: ErrorMessages) -> Self {
        let (presses, receiver) = mpsc::unbounded_channel();
        let image = ReplayLatest::new();
        let error_message = ReplayLatest::new();
        let worker = tokio::spawn(answer_presses(
            provider,
            receiver,
            image.clone(),
            error_message.clone(),
            messages,
        ));
        Self { presses, image, error_message, worker }
    }

    /// Register one press of the "choose image" button.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ViewModelClosed`] if presses are no longer answered.
    pub fn choose_image_pressed(&self) -> Result<(), AppError> {
        self.presses.send(()).map_err(|_| AppError::ViewModelClosed)
    }

    /// Forward every item of `presses` as a button press.
    ///
    /// The returned task finishes when `presses` ends.
    pub fn bind_presses<S>(&self, presses: S) -> JoinHandle<()>
    where
        S: Stream<Item = ()> + Send + 'static,
    {
        let sender = self.presses.clone();
        tokio::spawn(async move {
            let mut presses = std::pin::pin!(presses);
            while presses.next().await.is_some() {
                if sender.send(()).is_err() {
                    break;
                }
            }
        })
    }

    /// Images picked by successful presses. Replays the latest one.
    #[must_use]
    pub fn images(&self) -> BoxStream<'static, Image> {
        self.image.subscribe()
    }

    /// Messages for failed presses. Replays the latest one.
    #[must_use]
    pub fn error_messages(&self) -> BoxStream<'static, String> {
        self.error_message.subscribe()
    }

    /// Stop taking presses and wait until every queued press is answered.
    ///
    /// Bound press streams keep the view model alive until they end. Both
    /// output streams complete afterwards.
    pub async fn shutdown(self) {
        let Self { presses, image, error_message, worker } = self;
        drop(presses);
        drop(image);
        drop(error_message);
        if let Err(err) = worker.await {
            warn!(error = %err, "view model worker ended abnormally");
        }
    }
}

async fn answer_presses(
    provider: Arc<dyn ImageProvider>,
    mut presses: mpsc::UnboundedReceiver<()>,
    image: ReplayLatest<Image>,
    error_message: ReplayLatest<String>,
    messages: ErrorMessages,
) {
    let mut press: u64 = 0;
    while presses.recv().await.is_some() {
        press += 1;
        debug!(press, "choose image pressed");

        let result = AssertUnwindSafe(async { provider.request_image().await })
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(GalleryError::Unknown(panic_detail(&*payload))));

        match result {
            Ok(picked) => {
                debug!(press, mime_type = %picked.mime_type, bytes = picked.data.len(), "image received");
                image.publish(picked);
            }
            Err(err) => {
                info!(press, error = %err, "image request failed");
                error_message.publish(messages.message_for(&err));
            }
        }
    }
    debug!(presses = press, "button presses ended");
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "image provider panicked".to_string())
}
