//! Image provider port: the capability that fetches one image per request.

use std::future::Future;
use std::io;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An image handed back by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Raw encoded image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
}

impl Image {
    /// Create an image from encoded bytes and their MIME type.
    pub fn new(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self { data: data.into(), mime_type: mime_type.into() }
    }
}

/// Why a provider could not hand back an image.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum GalleryError {
    /// The user has not granted access to their photos.
    #[error("permission to read images was denied")]
    PermissionDenied,

    /// There was no suitable image to hand back.
    #[error("no suitable image was found")]
    NotFound,

    /// Anything else, with a diagnostic detail.
    #[error("image retrieval failed: {0}")]
    Unknown(String),
}

impl From<io::Error> for GalleryError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Unknown(err.to_string()),
        }
    }
}

/// Boxed future type returned by [`ImageProvider::request_image`].
pub type ImageFuture<'a> = Pin<Box<dyn Future<Output = Result<Image, GalleryError>> + Send + 'a>>;

/// Obtains an image on request, e.g. from a photo gallery.
///
/// Every call is an independent attempt.
pub trait ImageProvider: Send + Sync {
    /// Start one attempt to obtain an image.
    fn request_image(&self) -> ImageFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
