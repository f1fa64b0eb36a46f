//! Media index abstraction.
//!
//! A [`MediaStore`] answers projected queries over the videos it knows about
//! with a [`MediaCursor`]. Two stores are provided: [`FsMediaStore`], which
//! indexes storage roots on disk, and [`MemoryMediaStore`], which serves rows
//! handed to it by an embedding host.

mod filesystem;
mod memory;

pub use filesystem::{DurationProbe, FsMediaStore};
pub use memory::MemoryMediaStore;

use crate::error::MediaError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::trace;
use vsq_common::paths::title_of;

/// A column of the media index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// Absolute file path.
    Data,
    /// Duration in milliseconds.
    Duration,
    /// File name including extension.
    DisplayName,
    /// Seconds since the Unix epoch when the file entered the index.
    DateAdded,
    /// Seconds since the Unix epoch of the last modification.
    DateModified,
    /// Size in bytes.
    Size,
}

impl Column {
    /// Every column, in index order.
    pub const ALL: [Column; 6] = [
        Column::Data,
        Column::Duration,
        Column::DisplayName,
        Column::DateAdded,
        Column::DateModified,
        Column::Size,
    ];

    /// The column's name in the index.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Data => "_data",
            Self::Duration => "duration",
            Self::DisplayName => "_display_name",
            Self::DateAdded => "date_added",
            Self::DateModified => "date_modified",
            Self::Size => "_size",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the index. Columns without a value are null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRow {
    values: BTreeMap<Column, String>,
}

impl MediaRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.values.insert(column, value.into());
    }

    /// The column's value, or `None` when it is null.
    pub fn get(&self, column: Column) -> Option<&str> {
        self.values.get(&column).map(String::as_str)
    }

    /// Keep only the columns in `projection`.
    pub fn project(mut self, projection: &[Column]) -> Self {
        self.values.retain(|column, _| projection.contains(column));
        self
    }

    /// Key of the default sort order: title (display name without
    /// extension) compared case-insensitively, then path.
    fn sort_key(&self) -> (String, &str) {
        let title = self
            .get(Column::DisplayName)
            .map(|name| title_of(Path::new(name)))
            .unwrap_or_default()
            .to_lowercase();
        (title, self.get(Column::Data).unwrap_or_default())
    }
}

/// Sort rows into the index's default order.
pub fn sort_default(rows: &mut [MediaRow]) {
    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// Read-only, forward-only view over the rows of one query.
///
/// The cursor is released when dropped, so every exit path of a consumer
/// closes it.
pub struct MediaCursor {
    source: &'static str,
    rows: std::vec::IntoIter<MediaRow>,
    read: usize,
}

impl MediaCursor {
    /// Wrap already-projected rows coming from `source`.
    pub fn new(source: &'static str, rows: Vec<MediaRow>) -> Self {
        trace!("Opened {} cursor over {} rows", source, rows.len());
        Self {
            source,
            rows: rows.into_iter(),
            read: 0,
        }
    }

    /// Rows not yet read.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl Iterator for MediaCursor {
    type Item = MediaRow;

    fn next(&mut self) -> Option<MediaRow> {
        let row = self.rows.next()?;
        self.read += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl Drop for MediaCursor {
    fn drop(&mut self) {
        trace!(
            "Closed {} cursor after {} rows ({} unread)",
            self.source,
            self.read,
            self.rows.len()
        );
    }
}

/// A searchable catalog of the videos on this device.
pub trait MediaStore: Send + Sync {
    /// Open a cursor over every video, restricted to `projection`, in the
    /// store's default sort order.
    fn query(&self, projection: &[Column]) -> Result<MediaCursor, MediaError>;
}
