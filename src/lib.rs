//! video-storage-query - Video listing and thumbnail bridge
//!
//! This library crate exposes the core functionality for integration testing.

pub mod bridge;
pub mod config;
pub mod error;
pub mod permissions;
pub mod query;
pub mod store;

pub use error::MediaError;
pub use query::{MediaQuery, VideoQuery};
