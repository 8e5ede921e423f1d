//! Unified error type for the avatar picker.

use thiserror::Error;

/// Errors that can occur while wiring and running the avatar picker.
///
/// Failures of the image capability itself are not represented here; those
/// are [`GalleryError`](crate::ports::GalleryError)s and are turned into
/// display messages by the view model.
#[derive(Debug, Error)]
pub enum AppError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image decoding, resizing or encoding failed.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// A cassette could not be loaded or written.
    #[error("Cassette error: {0}")]
    Cassette(String),

    /// The view model no longer accepts button presses.
    #[error("View model is closed")]
    ViewModelClosed,

    /// No press produced an image; carries the last displayed message.
    #[error("No avatar picked: {0}")]
    NoAvatar(String),
}
