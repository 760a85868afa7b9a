//! Filesystem module.
//!
//! Provides:
//! - Destination directory preparation
//! - Filename validation

pub mod naming;
pub mod paths;

pub use naming::sanitize_filename;
pub use paths::prepare_destination;
