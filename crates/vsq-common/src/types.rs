//! The video record returned by a storage query.

use serde::{Deserialize, Serialize};

/// Keys of a serialized [`VideoRecord`], in declaration order.
pub const RECORD_KEYS: [&str; 6] = ["name", "path", "duration", "dateAdded", "dateModified", "size"];

/// One video known to the media index.
///
/// Every attribute is text. Numeric attributes keep the index's textual
/// form, and a missing value is the empty string rather than an absent key.
/// Records are built per query and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Display name, including extension.
    pub name: String,
    /// Absolute file path.
    pub path: String,
    /// Duration in milliseconds.
    pub duration: String,
    /// Seconds since the Unix epoch when the file entered the index.
    pub date_added: String,
    /// Seconds since the Unix epoch of the last modification.
    pub date_modified: String,
    /// Size in bytes.
    pub size: String,
}

impl VideoRecord {
    /// Key/value pairs in [`RECORD_KEYS`] order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            (RECORD_KEYS[0], self.name.as_str()),
            (RECORD_KEYS[1], self.path.as_str()),
            (RECORD_KEYS[2], self.duration.as_str()),
            (RECORD_KEYS[3], self.date_added.as_str()),
            (RECORD_KEYS[4], self.date_modified.as_str()),
            (RECORD_KEYS[5], self.size.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys() {
        let record = VideoRecord {
            name: "a.mp4".into(),
            path: "/v/a.mp4".into(),
            duration: "1500".into(),
            date_added: "1700000000".into(),
            date_modified: "1700000001".into(),
            size: "42".into(),
        };

        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), RECORD_KEYS.len());
        for key in RECORD_KEYS {
            assert!(obj[key].is_string(), "{key} should be a string");
        }
        assert_eq!(obj["dateAdded"], "1700000000");
    }

    #[test]
    fn test_fields_order() {
        let record = VideoRecord {
            size: "7".into(),
            ..Default::default()
        };
        let fields = record.fields();
        assert_eq!(fields.map(|(k, _)| k), RECORD_KEYS);
        assert_eq!(fields[5], ("size", "7"));
        assert_eq!(fields[0], ("name", ""));
    }
}
