//! Path utilities for detecting video files by extension.
//!
//! The media index uses these to decide which files under a storage root
//! count as videos.

use std::path::Path;

/// Video file extensions recognized when no custom list is configured.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mkv", "webm", "mov", "avi", "3gp", "3g2", "ts", "mpg", "mpeg", "wmv", "flv",
];

/// Check if a path has one of the built-in video file extensions.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use vsq_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("holiday.mp4")));
/// assert!(is_video_file(Path::new("/sdcard/DCIM/VID_0001.3GP")));
/// assert!(!is_video_file(Path::new("cover.jpg")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    has_extension(path, VIDEO_EXTENSIONS)
}

/// Check if a path's extension is in `extensions`, ignoring case.
///
/// Entries may be given with or without a leading dot.
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    extensions
        .iter()
        .any(|candidate| candidate.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// File name without its extension, used as the sortable title of a video.
///
/// ```
/// use std::path::Path;
/// use vsq_common::paths::title_of;
///
/// assert_eq!(title_of(Path::new("/videos/Beach Day.mp4")), "Beach Day");
/// ```
pub fn title_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
