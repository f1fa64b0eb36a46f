//! Media index built by walking storage roots.

use super::{sort_default, Column, MediaCursor, MediaRow, MediaStore};
use crate::config::Config;
use crate::error::MediaError;
use crate::permissions::open_root;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};
use vsq_av::{Backend, ToolPaths};
use vsq_common::paths::{has_extension, is_video_file};
use walkdir::WalkDir;

/// How durations are read for the `duration` column.
#[derive(Debug, Clone, Default)]
pub struct DurationProbe {
    pub backend: Backend,
    pub tools: ToolPaths,
}

impl DurationProbe {
    /// Duration of `path` in whole milliseconds, or `None` when it cannot be read.
    fn millis(&self, path: &Path) -> Option<u128> {
        match vsq_av::probe_duration(path, self.backend, &self.tools) {
            Ok(duration) => duration.map(|d| d.as_millis()),
            Err(e) => {
                debug!("No duration for {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Indexes every video file below a set of storage roots.
///
/// The index is rebuilt on each query; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
    follow_links: bool,
    duration_probe: Option<DurationProbe>,
}

impl FsMediaStore {
    /// Create a store over `roots` with the built-in video extensions and no
    /// duration probing.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            extensions: Vec::new(),
            follow_links: true,
            duration_probe: None,
        }
    }

    /// Build a store from the `[store]` and `[tools]` sections of `config`.
    pub fn from_config(config: &Config) -> Self {
        let probe = config.store.probe_durations.then(|| DurationProbe {
            backend: config.tools.backend,
            tools: config.tools.paths(),
        });

        Self::new(config.store.expanded_roots())
            .with_extensions(config.store.extensions.clone())
            .follow_links(config.store.follow_links)
            .with_duration_probe(probe)
    }

    /// Restrict indexing to these extensions; an empty list means the
    /// built-in video extensions.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_duration_probe(mut self, probe: Option<DurationProbe>) -> Self {
        self.duration_probe = probe;
        self
    }

    fn is_indexed(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            is_video_file(path)
        } else {
            has_extension(path, &self.extensions)
        }
    }

    /// Canonical form of every root whose entries can be listed.
    fn readable_roots(&self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .filter_map(|root| match open_root(root) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Storage root {:?} is not readable: {}", root, e);
                    None
                }
            })
            .collect()
    }

    fn build_row(&self, path: &Path, metadata: &Metadata, projection: &[Column]) -> MediaRow {
        let mut row = MediaRow::new();

        for column in projection {
            let value = match column {
                Column::Data => Some(path.to_string_lossy().into_owned()),
                Column::DisplayName => path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned()),
                Column::Size => Some(metadata.len().to_string()),
                Column::DateModified => metadata.modified().ok().map(epoch_seconds),
                Column::DateAdded => metadata
                    .created()
                    .or_else(|_| metadata.modified())
                    .ok()
                    .map(epoch_seconds),
                Column::Duration => self
                    .duration_probe
                    .as_ref()
                    .and_then(|probe| probe.millis(path))
                    .map(|ms| ms.to_string()),
            };

            if let Some(value) = value {
                row.set(*column, value);
            }
        }

        row
    }
}

fn epoch_seconds(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).timestamp().to_string()
}

impl MediaStore for FsMediaStore {
    fn query(&self, projection: &[Column]) -> Result<MediaCursor, MediaError> {
        let roots = self.readable_roots();
        if roots.is_empty() && !self.roots.is_empty() {
            return Err(MediaError::query_failure(format!(
                "none of the {} storage roots is readable",
                self.roots.len()
            )));
        }

        // Path and name are always read so rows can be ordered before projecting
        let columns: Vec<Column> = Column::ALL
            .into_iter()
            .filter(|c| projection.contains(c) || matches!(c, Column::Data | Column::DisplayName))
            .collect();

        let mut seen = HashSet::new();
        let mut rows = Vec::new();

        for root in &roots {
            debug!("Indexing storage root: {:?}", root);

            for entry in WalkDir::new(root)
                .follow_links(self.follow_links)
                .into_iter()
                .filter_map(|e| match e {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        debug!("Skipping unreadable entry: {}", err);
                        None
                    }
                })
            {
                if !entry.file_type().is_file() || !self.is_indexed(entry.path()) {
                    continue;
                }

                // Overlapping roots and linked directories must not list a file twice
                let identity = entry
                    .path()
                    .canonicalize()
                    .unwrap_or_else(|_| entry.path().to_path_buf());
                if !seen.insert(identity) {
                    continue;
                }

                match entry.metadata() {
                    Ok(metadata) => rows.push(self.build_row(entry.path(), &metadata, &columns)),
                    Err(e) => debug!("Skipping {:?}: {}", entry.path(), e),
                }
            }
        }

        sort_default(&mut rows);
        let rows = rows.into_iter().map(|row| row.project(projection)).collect::<Vec<_>>();

        info!("Indexed {} videos from {} storage roots", rows.len(), roots.len());
        Ok(MediaCursor::new("filesystem", rows))
    }
}
