//! Video duration probing.
//!
//! - **CLI-based** (default): runs `ffprobe` and parses its JSON output
//! - **Native FFmpeg** (optional): direct bindings via the `native-ffmpeg` feature

mod ffprobe;

#[cfg(feature = "native-ffmpeg")]
pub(crate) mod native_ffmpeg;

pub use ffprobe::probe_duration_with_ffprobe;

#[cfg(feature = "native-ffmpeg")]
pub use native_ffmpeg::probe_duration_with_native_ffmpeg;

use crate::{Backend, Error, Result, ToolPaths};
use std::path::Path;
use std::time::Duration;

/// Probe the duration of a video.
///
/// Returns `Ok(None)` when the container opens but reports no duration.
pub fn probe_duration(path: &Path, backend: Backend, tools: &ToolPaths) -> Result<Option<Duration>> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    match backend.resolve() {
        Backend::Native => probe_native(path),
        _ => probe_duration_with_ffprobe(path, &tools.ffprobe()?),
    }
}

#[cfg(feature = "native-ffmpeg")]
fn probe_native(path: &Path) -> Result<Option<Duration>> {
    native_ffmpeg::probe_duration_with_native_ffmpeg(path)
}

#[cfg(not(feature = "native-ffmpeg"))]
fn probe_native(_path: &Path) -> Result<Option<Duration>> {
    Err(Error::Unsupported(
        "native probing requires the `native-ffmpeg` feature".into(),
    ))
}
