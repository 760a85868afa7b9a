//! Media file downloading.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::StreamExt;
use reqwest::{header, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::InstagramApi;
use crate::download::state::TransferStats;
use crate::error::{Error, Result};
use crate::fs::sanitize_filename;
use crate::media::{profile_pic_filename, MediaItem, MediaType};

/// Download a media item into `target_dir`.
///
/// Returns `None` when a file of the same name already exists.
pub async fn download_media_item(
    api: &InstagramApi,
    item: &MediaItem,
    target_dir: &Path,
    stats: &mut TransferStats,
) -> Result<Option<PathBuf>> {
    let filename = sanitize_filename(&item.generate_filename())?;
    let output_path = target_dir.join(&filename);

    if output_path.exists() {
        stats.increment_skipped();
        tracing::debug!("Skipping existing file: {}", output_path.display());
        return Ok(None);
    }

    let response = api.download_file(&item.download_url).await?;
    write_response(response, &output_path).await?;

    match item.media_type {
        MediaType::Image => stats.increment_pic(),
        MediaType::Video => stats.increment_vid(),
    }

    tracing::debug!("Downloaded {}: {}", item.shortcode, output_path.display());
    Ok(Some(output_path))
}

/// Download a profile picture, named after its `Last-Modified` date.
pub async fn download_profile_pic(
    api: &InstagramApi,
    url: &str,
    target_dir: &Path,
    stats: &mut TransferStats,
) -> Result<Option<PathBuf>> {
    let response = api.download_file(url).await?;
    let changed_at = last_modified(&response).unwrap_or_else(Utc::now);
    let output_path = target_dir.join(profile_pic_filename(&changed_at));

    if output_path.exists() {
        stats.increment_skipped();
        tracing::debug!("Skipping existing file: {}", output_path.display());
        return Ok(None);
    }

    write_response(response, &output_path).await?;
    stats.increment_pic();

    tracing::debug!("Downloaded profile picture: {}", output_path.display());
    Ok(Some(output_path))
}

/// Stream a response body into `output_path` via a `.part` file.
async fn write_response(response: Response, output_path: &Path) -> Result<()> {
    let mut part_name = OsString::from(output_path.as_os_str());
    part_name.push(".part");
    let part_path = PathBuf::from(part_name);

    if let Err(e) = stream_to_file(response, &part_path).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(e);
    }

    tokio::fs::rename(&part_path, output_path).await?;
    Ok(())
}

async fn stream_to_file(response: Response, path: &Path) -> Result<()> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}

fn last_modified(response: &Response) -> Option<DateTime<Utc>> {
    let value = response.headers().get(header::LAST_MODIFIED)?.to_str().ok()?;
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
