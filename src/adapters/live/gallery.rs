//! Live adapter that picks the newest image from a gallery directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use image::ImageFormat;

use crate::ports::image_provider::{GalleryError, Image, ImageFuture, ImageProvider};

/// File extensions considered images when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Reads the most recently modified image in a directory.
#[derive(Debug, Clone)]
pub struct GalleryProvider {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl GalleryProvider {
    /// Create a provider over `dir` accepting [`DEFAULT_EXTENSIONS`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }

    /// Restrict the gallery to files with the given extensions (case-insensitive).
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Newest matching file; ties go to the greatest file name.
    async fn newest_image(&self) -> Result<PathBuf, GalleryError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut newest: Option<(SystemTime, PathBuf)> = None;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !self.accepts(&path) {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let candidate = (metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH), path);
            let is_newer = newest.as_ref().map_or(true, |current| candidate > *current);
            if is_newer {
                newest = Some(candidate);
            }
        }

        newest.map(|(_, path)| path).ok_or(GalleryError::NotFound)
    }
}

impl ImageProvider for GalleryProvider {
    fn request_image(&self) -> ImageFuture<'_> {
        Box::pin(async move {
            let path = self.newest_image().await?;
            tracing::debug!(path = %path.display(), "picked gallery image");
            let data = tokio::fs::read(&path).await?;
            Ok(Image::new(data, mime_for_path(&path)))
        })
    }
}

/// MIME type for an image file, judged by its extension.
fn mime_for_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path).map_or("application/octet-stream", |format| format.to_mime_type())
}
