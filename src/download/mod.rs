//! Download module for content downloading.
//!
//! This module provides:
//! - Transfer statistics
//! - Profile downloading (profile picture and every post)
//! - Media file downloading

#[cfg(feature = "web-client")]
pub mod media;
#[cfg(feature = "web-client")]
pub mod profile;
pub mod state;

#[cfg(feature = "web-client")]
pub use media::{download_media_item, download_profile_pic};
#[cfg(feature = "web-client")]
pub use profile::download_profile;
pub use state::TransferStats;
