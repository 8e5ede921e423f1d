//! Live adapters that reach real image sources.

pub mod gallery;
pub mod remote;
