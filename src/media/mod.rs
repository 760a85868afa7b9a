//! Media module for item representation and parsing.

pub mod item;
pub mod parser;

pub use item::{profile_pic_filename, MediaItem, MediaType};
pub use parser::{needs_details, parse_post};
