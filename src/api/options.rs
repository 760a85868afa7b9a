//! Session feature toggles.

/// What a session downloads for each post.
///
/// The defaults fetch only primary media: pictures and videos, without
/// video thumbnails, geotags, comments or metadata files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub download_pictures: bool,
    pub download_videos: bool,
    pub download_video_thumbnails: bool,
    pub download_geotags: bool,
    pub download_comments: bool,
    pub save_metadata: bool,
    pub compress_json: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            download_pictures: true,
            download_videos: true,
            download_video_thumbnails: false,
            download_geotags: false,
            download_comments: false,
            save_metadata: false,
            compress_json: false,
        }
    }
}
