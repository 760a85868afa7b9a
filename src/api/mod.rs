//! Instagram API module.
//!
//! This module provides:
//! - The `MediaClient` trait the downloader is written against
//! - HTTP client for the Instagram web API
//! - Login handshake helpers
//! - API response types

pub mod auth;
#[cfg(feature = "web-client")]
pub mod client;
pub mod options;
pub mod traits;
pub mod types;

#[cfg(feature = "web-client")]
pub use client::{InstagramApi, PAGE_SIZE};
pub use options::SessionOptions;
pub use traits::MediaClient;
pub use types::*;
