//! Conversion of post nodes into downloadable items.

use crate::api::options::SessionOptions;
use crate::api::types::PostNode;
use crate::media::item::{timestamp_to_utc, MediaItem, MediaType};

/// Turn a post into the items the session options ask for.
///
/// Sidecar children are numbered from 1 in display order.
pub fn parse_post(node: &PostNode, options: &SessionOptions) -> Vec<MediaItem> {
    let shortcode = node.shortcode.clone().unwrap_or_else(|| node.id.clone());
    let taken_at = timestamp_to_utc(node.taken_at_timestamp.unwrap_or(0));

    let make = |url: &str, media_type: MediaType, index: Option<usize>| MediaItem {
        shortcode: shortcode.clone(),
        taken_at,
        download_url: url.to_string(),
        media_type,
        index,
        file_extension: extract_extension(url, media_type),
    };

    let nodes: Vec<(&PostNode, Option<usize>)> = match &node.edge_sidecar_to_children {
        Some(children) if !children.edges.is_empty() => children
            .edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (&edge.node, Some(i + 1)))
            .collect(),
        _ => vec![(node, None)],
    };

    let mut items = Vec::new();
    for (child, index) in nodes {
        if child.is_video {
            if options.download_video_thumbnails {
                items.push(make(&child.display_url, MediaType::Image, index));
            }
            if options.download_videos {
                if let Some(url) = &child.video_url {
                    items.push(make(url, MediaType::Video, index));
                } else {
                    tracing::warn!("Video in post {} has no URL, skipping", shortcode);
                }
            }
        } else if options.download_pictures {
            items.push(make(&child.display_url, MediaType::Image, index));
        }
    }

    items
}

/// Whether a post lacks video URLs and must be fetched in full first.
pub fn needs_details(node: &PostNode) -> bool {
    let missing = |n: &PostNode| n.is_video && n.video_url.is_none();

    match &node.edge_sidecar_to_children {
        Some(children) if !children.edges.is_empty() => {
            children.edges.iter().any(|edge| missing(&edge.node))
        }
        _ => missing(node),
    }
}

/// Extract file extension from URL, falling back to the media type.
fn extract_extension(url: &str, media_type: MediaType) -> String {
    match extract_extension_from_url(url) {
        Some(ext) if is_media_extension(&ext) => ext,
        _ => media_type.default_extension().to_string(),
    }
}

/// Extract extension from URL path.
fn extract_extension_from_url(url: &str) -> Option<String> {
    // Remove query string
    let path = url.split('?').next()?;

    // Get the last segment
    let filename = path.rsplit('/').next()?;
    if !filename.contains('.') {
        return None;
    }

    let ext = filename.rsplit('.').next()?;

    // Validate it looks like an extension (1-10 chars, alphanumeric)
    if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_lowercase())
    } else {
        None
    }
}

/// Whether an extension names an image or video format.
fn is_media_extension(ext: &str) -> bool {
    mime_guess::from_ext(ext)
        .first()
        .map(|mime| matches!(mime.type_().as_str(), "image" | "video"))
        .unwrap_or(false)
}
