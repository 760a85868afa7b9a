//! Media item representation.

use chrono::{DateTime, TimeZone, Utc};

/// Timestamp layout used in filenames.
const FILENAME_DATE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Type of media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Extension used when none can be derived from the URL.
    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaType::Image => "jpg",
            MediaType::Video => "mp4",
        }
    }
}

/// A downloadable media item.
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// Shortcode of the post the item belongs to.
    pub shortcode: String,

    /// When the post was published.
    pub taken_at: DateTime<Utc>,

    /// Download URL.
    pub download_url: String,

    /// Kind of media.
    pub media_type: MediaType,

    /// Position within a sidecar post, starting at 1.
    pub index: Option<usize>,

    /// File extension (without dot).
    pub file_extension: String,
}

impl MediaItem {
    /// Generate the filename for this media item.
    ///
    /// `2024-01-31_18-05-00_UTC.jpg` for single posts and
    /// `2024-01-31_18-05-00_UTC_2.mp4` for the second item of a sidecar.
    pub fn generate_filename(&self) -> String {
        let stem = format_timestamp(&self.taken_at);
        match self.index {
            Some(index) => format!("{}_UTC_{}.{}", stem, index, self.file_extension),
            None => format!("{}_UTC.{}", stem, self.file_extension),
        }
    }

    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }
}

/// Filename of a profile picture last changed at `taken_at`.
pub fn profile_pic_filename(taken_at: &DateTime<Utc>) -> String {
    format!("{}_UTC_profile_pic.jpg", format_timestamp(taken_at))
}

/// Convert a unix timestamp in seconds, falling back to the epoch.
pub fn timestamp_to_utc(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(FILENAME_DATE_FORMAT).to_string()
}
