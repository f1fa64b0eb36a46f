//! Error types for vsq-av.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while probing or decoding a video.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool failed to execute.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// Failed to parse tool output.
    #[error("failed to parse {tool} output: {message}")]
    ParseError { tool: String, message: String },

    /// The specified file was not found.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file opened but no video frame could be decoded from it.
    #[error("no decodable video frame in {}", path.display())]
    NoFrame { path: PathBuf },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raster decoding or PNG encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Unsupported operation for this build.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// FFmpeg library error.
    #[cfg(feature = "native-ffmpeg")]
    #[error("FFmpeg error: {0}")]
    FFmpeg(String),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a no-frame error.
    pub fn no_frame(path: impl Into<PathBuf>) -> Self {
        Self::NoFrame { path: path.into() }
    }
}

#[cfg(feature = "native-ffmpeg")]
impl From<ffmpeg_the_third::Error> for Error {
    fn from(err: ffmpeg_the_third::Error) -> Self {
        Error::FFmpeg(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::file_not_found("/missing.mp4");
        assert_eq!(err.to_string(), "file not found: /missing.mp4");

        let err = Error::no_frame("/broken.mkv");
        assert_eq!(err.to_string(), "no decodable video frame in /broken.mkv");

        let err = Error::tool_failed("ffmpeg", "exit status 1");
        assert_eq!(err.to_string(), "tool execution failed: ffmpeg: exit status 1");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(Error::from(io_err), Error::Io(_)));
    }
}
