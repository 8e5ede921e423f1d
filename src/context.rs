//! Service context that bundles the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::adapters::live::gallery::GalleryProvider;
use crate::adapters::live::remote::RemoteImageProvider;
use crate::adapters::recording::image_provider::RecordingImageProvider;
use crate::adapters::replaying::image_provider::ReplayingImageProvider;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::{Config, ImageSource};
use crate::error::AppError;
use crate::ports::ImageProvider;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image provider port.
    pub provider: Arc<dyn ImageProvider>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the cassette with everything recorded so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, AppError> {
        self.recorder.lock().unwrap_or_else(PoisonError::into_inner).write()
    }
}

impl ServiceContext {
    /// Create a live context reading from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for a remote source cannot be built.
    pub fn live(source: &ImageSource, config: &Config) -> Result<Self, AppError> {
        let provider: Arc<dyn ImageProvider> = match source {
            ImageSource::Gallery(dir) => Arc::new(
                GalleryProvider::new(dir).with_extensions(&config.gallery.extensions),
            ),
            ImageSource::Remote(url) => Arc::new(RemoteImageProvider::new(
                url.clone(),
                Duration::from_secs(config.remote.timeout_secs),
            )?),
        };
        Ok(Self { provider })
    }

    /// Create a recording context that wraps a live provider with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live provider cannot be created.
    pub fn recording(
        source: &ImageSource,
        config: &Config,
    ) -> Result<(Self, RecordingSession), AppError> {
        let live_ctx = Self::live(source, config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".avatar/cassettes")
            .join(&timestamp)
            .join("image_provider.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_provider"),
            get_commit_hash(),
        )));

        let provider = RecordingImageProvider::new(live_ctx.provider, Arc::clone(&recorder));
        Ok((Self { provider: Arc::new(provider) }, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, AppError> {
        let replayer = Arc::new(Mutex::new(load_cassette(path)?));
        Ok(Self { provider: Arc::new(ReplayingImageProvider::new(replayer)) })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
