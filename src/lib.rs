//! Avatar picker - press a button, get an image or a friendly error message.
//!
//! The heart of the crate is [`view_model::AvatarViewModel`], which answers
//! each press of a "choose image" button by asking an injected
//! [`ports::ImageProvider`] for exactly one image. Around it live the
//! adapters (gallery directory, HTTP, cassette record/replay), configuration
//! and the pieces used by the `avatar` binary.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod messages;
pub mod output;
pub mod ports;
pub mod relay;
pub mod view_model;
