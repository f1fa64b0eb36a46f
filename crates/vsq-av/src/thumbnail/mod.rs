//! Thumbnail extraction: decode one frame, encode it as PNG.
//!
//! Frame selection is the first decodable frame of the first video stream,
//! for every backend. Thumbnails are therefore deterministic for a given
//! file, but not necessarily representative of its content (a fade-in
//! yields a black thumbnail).

mod cli;
mod png;

#[cfg(feature = "native-ffmpeg")]
mod native_ffmpeg;

pub use cli::FfmpegCliDecoder;
pub use png::{encode_png, fit_width};

#[cfg(feature = "native-ffmpeg")]
pub use native_ffmpeg::NativeFfmpegDecoder;

use crate::{Backend, Error, Result, ToolPaths};
use std::path::Path;

/// The eight bytes every PNG stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A decoded frame in 8-bit RGBA.
pub type Frame = image::RgbaImage;

/// Something that can pull a raster frame out of a video file.
pub trait FrameDecoder: Send + Sync {
    /// Decode the first decodable video frame of `path`.
    fn decode_frame(&self, path: &Path) -> Result<Frame>;
}

/// Post-processing applied to a decoded frame before encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThumbnailOptions {
    /// Downscale so the width does not exceed this, keeping the aspect ratio.
    pub max_width: Option<u32>,
}

/// Build the frame decoder for `backend`.
///
/// CLI tool paths are resolved on every decode, so a missing `ffmpeg` only
/// fails thumbnail calls, not construction.
pub fn decoder_for(backend: Backend, tools: &ToolPaths) -> Result<Box<dyn FrameDecoder>> {
    match backend.resolve() {
        Backend::Native => native_decoder(),
        _ => Ok(Box::new(FfmpegCliDecoder::new(tools.clone()))),
    }
}

#[cfg(feature = "native-ffmpeg")]
fn native_decoder() -> Result<Box<dyn FrameDecoder>> {
    Ok(Box::new(NativeFfmpegDecoder::new()))
}

#[cfg(not(feature = "native-ffmpeg"))]
fn native_decoder() -> Result<Box<dyn FrameDecoder>> {
    Err(Error::Unsupported(
        "native decoding requires the `native-ffmpeg` feature".into(),
    ))
}

/// Decode a frame of `path` with `decoder` and return it PNG-encoded.
///
/// The returned buffer is never empty and always starts with
/// [`PNG_SIGNATURE`].
pub fn extract_thumbnail(
    decoder: &dyn FrameDecoder,
    path: &Path,
    options: &ThumbnailOptions,
) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(Error::file_not_found(path));
    }

    let frame = decoder.decode_frame(path)?;
    if frame.width() == 0 || frame.height() == 0 {
        return Err(Error::no_frame(path));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Decoded {}x{} frame from {}",
        frame.width(),
        frame.height(),
        path.display()
    );

    let frame = fit_width(frame, options.max_width);
    encode_png(&frame)
}
