//! In-process frame decoding using ffmpeg-the-third bindings.

use super::{Frame, FrameDecoder};
use crate::probe::native_ffmpeg::open_input;
use crate::{Error, Result};
use ffmpeg::format::Pixel;
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};
use ffmpeg::util::frame::video::Video;
use ffmpeg_the_third as ffmpeg;
use std::path::Path;

/// Decodes the first frame of the best video stream and converts it to RGBA.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFfmpegDecoder;

impl NativeFfmpegDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FrameDecoder for NativeFfmpegDecoder {
    fn decode_frame(&self, path: &Path) -> Result<Frame> {
        let mut ictx = open_input(path)?;

        let (stream_idx, mut decoder) = {
            let stream = ictx
                .streams()
                .best(Type::Video)
                .ok_or_else(|| Error::no_frame(path))?;
            let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
            (stream.index(), context.decoder().video()?)
        };

        let (width, height) = (decoder.width(), decoder.height());
        if width == 0 || height == 0 {
            return Err(Error::no_frame(path));
        }

        let mut scaler = SwsContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGBA,
            width,
            height,
            Flags::BILINEAR,
        )?;

        let mut decoded = Video::empty();
        for (stream, packet) in ictx.packets().flatten() {
            if stream.index() != stream_idx {
                continue;
            }
            if decoder.send_packet(&packet).is_err() {
                continue;
            }
            if decoder.receive_frame(&mut decoded).is_ok() {
                return to_rgba(&mut scaler, &decoded, width, height);
            }
        }

        // Drain frames still buffered in the decoder
        decoder.send_eof()?;
        if decoder.receive_frame(&mut decoded).is_ok() {
            return to_rgba(&mut scaler, &decoded, width, height);
        }

        Err(Error::no_frame(path))
    }
}

fn to_rgba(scaler: &mut SwsContext, decoded: &Video, width: u32, height: u32) -> Result<Frame> {
    let mut rgba = Video::empty();
    scaler.run(decoded, &mut rgba)?;

    // Copy visible pixels only, skipping stride padding
    let stride = rgba.stride(0);
    let raw = rgba.data(0);
    let row_bytes = width as usize * 4;
    let data: Vec<u8> = (0..height as usize)
        .flat_map(|row| &raw[row * stride..row * stride + row_bytes])
        .copied()
        .collect();

    Frame::from_raw(width, height, data)
        .ok_or_else(|| Error::FFmpeg("scaled frame buffer has the wrong size".into()))
}
