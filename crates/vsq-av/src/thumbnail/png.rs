//! PNG encoding of decoded frames.

use super::Frame;
use crate::Result;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::imageops;
use image::{ExtendedColorType, ImageEncoder};

/// Encode a frame as PNG with the strongest compression.
///
/// PNG is lossless, so this is the "maximum quality" setting; only the size
/// of the output changes with the compression level.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive).write_image(
        frame.as_raw(),
        frame.width(),
        frame.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

/// Downscale `frame` to `max_width`, keeping the aspect ratio.
///
/// Frames already narrower than the limit are returned untouched.
pub fn fit_width(frame: Frame, max_width: Option<u32>) -> Frame {
    let Some(max_width) = max_width.filter(|w| *w > 0) else {
        return frame;
    };
    if frame.width() <= max_width {
        return frame;
    }

    let height = ((frame.height() as u64 * max_width as u64) / frame.width() as u64).max(1) as u32;
    imageops::resize(&frame, max_width, height, imageops::FilterType::Triangle)
}
