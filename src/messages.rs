//! Human-readable messages for image retrieval failures.

use crate::ports::GalleryError;

/// Shown when the user has not granted access to their photos.
pub const PERMISSION_DENIED_MESSAGE: &str = "I don't have permission to read your photos ;(";

/// Shown when there is no suitable image to pick.
pub const NOT_FOUND_MESSAGE: &str = "I didn't find the proper image";

/// Shown for every other failure unless configured otherwise.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Something went wrong while reading your photos";

/// Maps a [`GalleryError`] to the message displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    fallback: String,
}

impl ErrorMessages {
    /// Use `fallback` for failures that have no dedicated message.
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self { fallback: fallback.into() }
    }

    /// The message for an unmapped failure.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// The display message for `err`.
    #[must_use]
    pub fn message_for(&self, err: &GalleryError) -> String {
        match err {
            GalleryError::PermissionDenied => PERMISSION_DENIED_MESSAGE.to_string(),
            GalleryError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            GalleryError::Unknown(_) => self.fallback.clone(),
        }
    }
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self::with_fallback(DEFAULT_FALLBACK_MESSAGE)
    }
}
