//! # vsq-av
//!
//! Video probing and thumbnail extraction.
//!
//! This crate provides functionality for:
//! - Probing a video's duration
//! - Decoding a representative frame and encoding it as PNG
//! - Detecting the external tools these operations need
//!
//! ## Features
//!
//! - `native-ffmpeg` - Decode and probe in-process via `ffmpeg-the-third`
//! - `tracing` - Enable tracing support
//!
//! Without `native-ffmpeg` the `ffmpeg` and `ffprobe` command-line tools are
//! used.
//!
//! ## Example
//!
//! ```no_run
//! use vsq_av::{thumbnail, Backend, ThumbnailOptions, ToolPaths};
//!
//! let decoder = thumbnail::decoder_for(Backend::Auto, &ToolPaths::default())?;
//! let png = thumbnail::extract_thumbnail(
//!     decoder.as_ref(),
//!     "/path/to/video.mp4".as_ref(),
//!     &ThumbnailOptions::default(),
//! )?;
//! assert!(png.starts_with(&vsq_av::PNG_SIGNATURE));
//! # Ok::<(), vsq_av::Error>(())
//! ```

mod error;
pub mod probe;
pub mod thumbnail;
pub mod tools;

use serde::{Deserialize, Serialize};

// Re-exports
pub use error::{Error, Result};
pub use probe::probe_duration;
pub use thumbnail::{FrameDecoder, ThumbnailOptions, PNG_SIGNATURE};
pub use tools::{check_tool, check_tools, require_tool, ToolInfo, ToolPaths};

/// Which implementation probes durations and decodes frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Native bindings when compiled in, otherwise the CLI tools.
    #[default]
    Auto,
    /// `ffmpeg` / `ffprobe` subprocesses.
    Cli,
    /// In-process FFmpeg bindings (requires the `native-ffmpeg` feature).
    Native,
}

impl Backend {
    /// Resolve `Auto` to a concrete backend for this build.
    pub fn resolve(self) -> Backend {
        match self {
            Backend::Auto if cfg!(feature = "native-ffmpeg") => Backend::Native,
            Backend::Auto => Backend::Cli,
            other => other,
        }
    }
}
