//! Share-and-replay-latest relay used for the view model outputs.
//!
//! A [`ReplayLatest`] fans values out to any number of subscribers. A new
//! subscriber first sees the most recent value (if any), then everything
//! published afterwards, each exactly once. Producing a value happens once,
//! no matter how many subscribers there are.

use std::sync::{Arc, Mutex, PoisonError};

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Multicasts values and replays the latest one to late subscribers.
///
/// Each subscriber has its own unbounded queue, so a slow subscriber never
/// loses values. Subscriber streams complete once every handle has been
/// dropped.
pub struct ReplayLatest<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

struct Shared<T> {
    latest: Option<T>,
    subscribers: Vec<mpsc::UnboundedSender<T>>,
}

impl<T> ReplayLatest<T>
where
    T: Clone + Send + 'static,
{
    /// Create a relay with no value and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self { shared: Arc::new(Mutex::new(Shared { latest: None, subscribers: Vec::new() })) }
    }

    /// Publish `value` to current subscribers and remember it for later ones.
    pub fn publish(&self, value: T) {
        let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        // Dropped subscriber streams are forgotten here.
        shared.subscribers.retain(|subscriber| subscriber.send(value.clone()).is_ok());
        shared.latest = Some(value);
    }

    /// Subscribe: the latest value first, then every later one in order.
    #[must_use]
    pub fn subscribe(&self) -> BoxStream<'static, T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let replay = {
            let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
            shared.subscribers.push(sender);
            shared.latest.clone()
        };

        stream::iter(replay).chain(UnboundedReceiverStream::new(receiver)).boxed()
    }
}

impl<T> Clone for ReplayLatest<T> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<T> Default for ReplayLatest<T>
where
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
