//! vsq-common: shared types and utilities.
//!
//! - **Video records**: the record shape returned by a video query
//! - **Path utilities**: detect video files by extension
//!
//! # Examples
//!
//! ```
//! use vsq_common::paths::is_video_file;
//! use vsq_common::VideoRecord;
//! use std::path::Path;
//!
//! assert!(is_video_file(Path::new("clip.mp4")));
//!
//! let record = VideoRecord::default();
//! assert!(record.name.is_empty());
//! ```

pub mod paths;
pub mod types;

pub use types::*;
