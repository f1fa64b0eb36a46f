//! Native FFmpeg duration probing using ffmpeg-the-third bindings.

use crate::{Error, Result};
use ffmpeg_the_third as ffmpeg;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

static FFMPEG_INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Initialize the FFmpeg libraries once per process.
pub(crate) fn init_ffmpeg() -> Result<()> {
    FFMPEG_INIT
        .get_or_init(|| ffmpeg::init().map_err(|e| e.to_string()))
        .clone()
        .map_err(Error::FFmpeg)
}

/// Open `path` as an input container, mapping "no such file" to [`Error::FileNotFound`].
pub(crate) fn open_input(path: &Path) -> Result<ffmpeg::format::context::Input> {
    init_ffmpeg()?;

    ffmpeg::format::input(path).map_err(|e| {
        if e.to_string().contains("No such file") {
            Error::file_not_found(path)
        } else {
            Error::from(e)
        }
    })
}

/// Probe a video's duration without spawning a subprocess.
pub fn probe_duration_with_native_ffmpeg(path: &Path) -> Result<Option<Duration>> {
    let context = open_input(path)?;

    if context.duration() > 0 {
        return Ok(Some(Duration::from_micros(context.duration() as u64)));
    }

    // Fall back to the video stream's own duration
    let Some(stream) = context.streams().best(ffmpeg::media::Type::Video) else {
        return Ok(None);
    };
    let tb = stream.time_base();
    if stream.duration() <= 0 || tb.denominator() == 0 {
        return Ok(None);
    }

    let secs = stream.duration() as f64 * tb.numerator() as f64 / tb.denominator() as f64;
    Ok(Some(Duration::from_secs_f64(secs)))
}
