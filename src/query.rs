//! The media query component: list videos, extract thumbnails.

use crate::config::Config;
use crate::error::MediaError;
use crate::store::{Column, FsMediaStore, MediaStore};
use std::path::Path;
use tracing::{debug, warn};
use vsq_av::thumbnail::{self, FrameDecoder};
use vsq_av::ThumbnailOptions;
use vsq_common::VideoRecord;

/// Columns read for every listed video.
pub const VIDEO_PROJECTION: [Column; 6] = [
    Column::Data,
    Column::Duration,
    Column::DisplayName,
    Column::DateAdded,
    Column::DateModified,
    Column::Size,
];

/// The two capabilities the bridge exposes.
pub trait MediaQuery: Send + Sync {
    /// Every video in the index, in the index's default order.
    ///
    /// Never fails: an unavailable index yields an empty list.
    fn list_videos(&self) -> Vec<VideoRecord>;

    /// A PNG-encoded frame of the video at `path`.
    fn extract_thumbnail(&self, path: &Path) -> Result<Vec<u8>, MediaError>;
}

/// [`MediaQuery`] over a [`MediaStore`] and a [`FrameDecoder`].
pub struct VideoQuery {
    store: Box<dyn MediaStore>,
    decoder: Box<dyn FrameDecoder>,
    options: ThumbnailOptions,
}

impl VideoQuery {
    pub fn new(store: Box<dyn MediaStore>, decoder: Box<dyn FrameDecoder>) -> Self {
        Self {
            store,
            decoder,
            options: ThumbnailOptions::default(),
        }
    }

    /// Build the filesystem-backed query component described by `config`.
    pub fn from_config(config: &Config) -> vsq_av::Result<Self> {
        let decoder = thumbnail::decoder_for(config.tools.backend, &config.tools.paths())?;

        Ok(Self::new(Box::new(FsMediaStore::from_config(config)), decoder)
            .with_options(config.thumbnail.options()))
    }

    pub fn with_options(mut self, options: ThumbnailOptions) -> Self {
        self.options = options;
        self
    }
}

impl MediaQuery for VideoQuery {
    fn list_videos(&self) -> Vec<VideoRecord> {
        let cursor = match self.store.query(&VIDEO_PROJECTION) {
            Ok(cursor) => cursor,
            Err(e) => {
                warn!("Video query failed, returning no videos: {}", e);
                return Vec::new();
            }
        };

        let videos: Vec<VideoRecord> = cursor
            .map(|row| {
                let column = |c: Column| row.get(c).unwrap_or_default().to_string();
                VideoRecord {
                    name: column(Column::DisplayName),
                    path: column(Column::Data),
                    duration: column(Column::Duration),
                    date_added: column(Column::DateAdded),
                    date_modified: column(Column::DateModified),
                    size: column(Column::Size),
                }
            })
            .collect();

        debug!("Listed {} videos", videos.len());
        videos
    }

    fn extract_thumbnail(&self, path: &Path) -> Result<Vec<u8>, MediaError> {
        thumbnail::extract_thumbnail(self.decoder.as_ref(), path, &self.options)
            .map_err(|e| MediaError::decode_failure(path, e))
    }
}
