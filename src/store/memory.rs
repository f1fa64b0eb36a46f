//! Media index backed by rows supplied by the embedding host.

use super::{sort_default, Column, MediaCursor, MediaRow, MediaStore};
use crate::error::MediaError;

/// Serves a fixed set of rows, e.g. mirrored from a platform media catalog.
#[derive(Debug, Clone)]
pub struct MemoryMediaStore {
    rows: Vec<MediaRow>,
    available: bool,
}

impl MemoryMediaStore {
    pub fn new(rows: Vec<MediaRow>) -> Self {
        Self {
            rows,
            available: true,
        }
    }

    /// A store whose every query fails, as when the host catalog is offline.
    pub fn unavailable() -> Self {
        Self {
            rows: Vec::new(),
            available: false,
        }
    }

    pub fn insert(&mut self, row: MediaRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl MediaStore for MemoryMediaStore {
    fn query(&self, projection: &[Column]) -> Result<MediaCursor, MediaError> {
        if !self.available {
            return Err(MediaError::query_failure("in-memory catalog is offline"));
        }

        let mut rows = self.rows.clone();
        sort_default(&mut rows);
        let rows = rows.into_iter().map(|row| row.project(projection)).collect();

        Ok(MediaCursor::new("memory", rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_sorts_and_projects() {
        let mut store = MemoryMediaStore::new(vec![MediaRow::new()
            .with(Column::DisplayName, "zebra.mp4")
            .with(Column::Size, "1")]);
        store.insert(
            MediaRow::new()
                .with(Column::DisplayName, "ant.mp4")
                .with(Column::Size, "2"),
        );
        assert_eq!(store.len(), 2);

        let rows: Vec<_> = store.query(&[Column::Size]).unwrap().collect();
        let sizes: Vec<_> = rows.iter().map(|r| r.get(Column::Size).unwrap()).collect();
        assert_eq!(sizes, ["2", "1"]);
        assert_eq!(rows[0].get(Column::DisplayName), None);
    }

    #[test]
    fn test_unavailable_store_fails() {
        let store = MemoryMediaStore::unavailable();
        assert!(store.is_empty());
        assert!(matches!(
            store.query(&Column::ALL).err(),
            Some(MediaError::QueryFailure(_))
        ));
    }
}
