//! Shared test doubles for view model tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use avatar_picker::ports::{GalleryError, Image, ImageFuture, ImageProvider};
use futures::stream::{self, BoxStream, StreamExt};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Image provider stub that counts invocations and answers from a script.
///
/// Answers are consumed front to back; the last one repeats forever.
pub struct ImageProviderStub {
    answers: Mutex<Vec<Result<Image, GalleryError>>>,
    delay: Option<Duration>,
    invocations: AtomicUsize,
}

impl ImageProviderStub {
    pub fn returning(image: Image) -> Arc<Self> {
        Self::scripted(vec![Ok(image)])
    }

    pub fn failing(err: GalleryError) -> Arc<Self> {
        Self::scripted(vec![Err(err)])
    }

    pub fn scripted(answers: Vec<Result<Image, GalleryError>>) -> Arc<Self> {
        Arc::new(Self { answers: Mutex::new(answers), delay: None, invocations: AtomicUsize::new(0) })
    }

    pub fn slow(image: Image, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(vec![Ok(image)]),
            delay: Some(delay),
            invocations: AtomicUsize::new(0),
        })
    }

    /// Change what subsequent requests answer with.
    pub fn answer_with(&self, answer: Result<Image, GalleryError>) {
        *self.answers.lock().unwrap() = vec![answer];
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    fn next_answer(&self) -> Result<Image, GalleryError> {
        let mut answers = self.answers.lock().unwrap();
        if answers.len() > 1 {
            answers.remove(0)
        } else {
            answers[0].clone()
        }
    }
}

impl ImageProvider for ImageProviderStub {
    fn request_image(&self) -> ImageFuture<'_> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        let answer = self.next_answer();
        let delay = self.delay;
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            answer
        })
    }
}

/// A small distinguishable image.
pub fn sample_image(tag: u8) -> Image {
    Image::new(vec![0x89, b'P', b'N', b'G', tag], "image/png")
}

/// Milliseconds elapsed since `start` on the (paused) Tokio clock.
pub fn millis_since(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap()
}

/// Press stream that fires at each of `times` (milliseconds after `start`).
pub fn presses_at(start: Instant, times: &[u64]) -> BoxStream<'static, ()> {
    stream::iter(times.to_vec())
        .then(move |at| async move {
            tokio::time::sleep_until(start + Duration::from_millis(at)).await;
        })
        .boxed()
}

/// Record every item of `stream` with the time it was observed.
pub fn record<T: Send + 'static>(
    start: Instant,
    stream: BoxStream<'static, T>,
) -> JoinHandle<Vec<(u64, T)>> {
    tokio::spawn(async move {
        stream.map(|item| (millis_since(start), item)).collect::<Vec<_>>().await
    })
}
