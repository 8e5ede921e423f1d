//! Adapter implementations for port traits.
//!
//! - `live/` — Real image sources (gallery directory, HTTP)
//! - `recording/` — Record interactions to cassettes
//! - `replaying/` — Replay interactions from cassettes

pub mod live;
pub mod recording;
pub mod replaying;

/// Cassette port name used for [`ImageProvider`](crate::ports::ImageProvider).
pub const IMAGE_PROVIDER_PORT: &str = "image_provider";

/// Cassette method name used for `request_image`.
pub const REQUEST_IMAGE_METHOD: &str = "request_image";
