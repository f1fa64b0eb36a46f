//! Frame decoding through the `ffmpeg` command-line tool.

use super::{Frame, FrameDecoder};
use crate::{Error, Result, ToolPaths};
use image::ImageFormat;
use std::path::Path;
use std::process::Command;

/// Decodes frames by asking `ffmpeg` for a single PNG on stdout.
#[derive(Debug, Clone, Default)]
pub struct FfmpegCliDecoder {
    tools: ToolPaths,
}

impl FfmpegCliDecoder {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }
}

impl FrameDecoder for FfmpegCliDecoder {
    fn decode_frame(&self, path: &Path) -> Result<Frame> {
        let ffmpeg = self.tools.ffmpeg()?;

        let output = Command::new(&ffmpeg)
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(path)
            .args([
                "-map", "0:v:0", "-frames:v", "1", "-f", "image2pipe", "-c:v", "png", "-",
            ])
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("ffmpeg")
                } else {
                    Error::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(path, stderr.trim()));
        }

        if output.stdout.is_empty() {
            return Err(Error::no_frame(path));
        }

        let image = image::load_from_memory_with_format(&output.stdout, ImageFormat::Png)?;
        Ok(image.to_rgba8())
    }
}

/// Tell "there is no picture in this file" apart from other tool failures.
fn classify_failure(path: &Path, stderr: &str) -> Error {
    let lower = stderr.to_lowercase();
    if lower.contains("matches no streams") || lower.contains("does not contain any stream") {
        Error::no_frame(path)
    } else {
        Error::tool_failed("ffmpeg", stderr)
    }
}
