//! Failure categories of the media query component.

use std::path::PathBuf;

/// Errors surfaced by the media index and the thumbnail path.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The media index could not be opened.
    ///
    /// Listing recovers from this by returning no videos.
    #[error("media index unavailable: {0}")]
    QueryFailure(String),

    /// No frame could be extracted from the file.
    #[error("could not decode a frame from {}: {source}", path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: vsq_av::Error,
    },
}

impl MediaError {
    /// Create a new QueryFailure error.
    pub fn query_failure<S: Into<String>>(msg: S) -> Self {
        Self::QueryFailure(msg.into())
    }

    /// Create a new DecodeFailure error.
    pub fn decode_failure(path: impl Into<PathBuf>, source: vsq_av::Error) -> Self {
        Self::DecodeFailure {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MediaError::query_failure("no readable storage root");
        assert_eq!(err.to_string(), "media index unavailable: no readable storage root");

        let err = MediaError::decode_failure(
            "/v/broken.mp4",
            vsq_av::Error::no_frame("/v/broken.mp4"),
        );
        assert_eq!(
            err.to_string(),
            "could not decode a frame from /v/broken.mp4: no decodable video frame in /v/broken.mp4"
        );
    }

    #[test]
    fn test_decode_failure_keeps_source() {
        use std::error::Error as _;

        let err = MediaError::decode_failure("/x.mp4", vsq_av::Error::file_not_found("/x.mp4"));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "file not found: /x.mp4");
    }
}
