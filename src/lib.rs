//! Instagram Downloader - download every picture and video of an Instagram account
//!
//! # Features
//!
//! - Anonymous or logged-in sessions
//! - Profile picture and all posts, including sidecar (multi-media) posts
//! - Primary media only: no thumbnails, geotags, comments or metadata files
//! - Existing files are never overwritten
//!
//! # Example
//!
//! ```no_run
//! use instagram_downloader::{download_account, DownloadRequest, InstagramApi, SessionOptions};
//! use instagram_downloader::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::for_target("natgeo");
//!     let mut api = InstagramApi::new(&config, SessionOptions::default())?;
//!
//!     let outcome = download_account(&mut api, &DownloadRequest::new("natgeo")).await;
//!     std::process::exit(outcome.exit_code());
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod orchestrator;
pub mod output;

// Re-exports for convenience
#[cfg(feature = "web-client")]
pub use api::InstagramApi;
pub use api::{MediaClient, Profile, SessionOptions};
pub use config::Config;
pub use download::TransferStats;
pub use error::{Error, ErrorCategory, Result};
pub use media::{MediaItem, MediaType};
pub use orchestrator::{download_account, run, Credentials, DownloadRequest, Outcome};
