//! Error types for the instagram-downloader application.

use std::fmt;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Startup errors
    #[error(
        "the Instagram web client is not available in this build. \
         Please reinstall with: cargo install instagram-downloader --features web-client"
    )]
    MissingDependency,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Authentication errors
    #[error("Invalid login credentials")]
    BadCredentials,

    #[error("Two-factor authentication is enabled. Please disable it temporarily.")]
    TwoFactorRequired,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    // Profile errors
    #[error("Profile '{0}' does not exist")]
    ProfileNotFound(String),

    #[error("Profile '{0}' is private and you are not following it")]
    PrivateProfileNotFollowed(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited by Instagram, please wait a few minutes")]
    RateLimited,

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[cfg(feature = "web-client")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MissingDependency,
    AuthInvalidCredentials,
    AuthTwoFactorRequired,
    AuthOther,
    TargetNotFound,
    TargetPrivateNotFollowed,
    TransferOther,
    Unexpected,
}

impl ErrorCategory {
    /// Category for an error raised while logging in.
    pub fn from_login_error(err: &Error) -> Self {
        match err {
            Error::MissingDependency => ErrorCategory::MissingDependency,
            Error::BadCredentials => ErrorCategory::AuthInvalidCredentials,
            Error::TwoFactorRequired => ErrorCategory::AuthTwoFactorRequired,
            _ => ErrorCategory::AuthOther,
        }
    }

    /// Category for an error raised while resolving or downloading a profile.
    pub fn from_transfer_error(err: &Error) -> Self {
        match err {
            Error::MissingDependency => ErrorCategory::MissingDependency,
            Error::ProfileNotFound(_) => ErrorCategory::TargetNotFound,
            Error::PrivateProfileNotFollowed(_) => ErrorCategory::TargetPrivateNotFollowed,
            _ => ErrorCategory::TransferOther,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::MissingDependency => write!(f, "missing dependency"),
            ErrorCategory::AuthInvalidCredentials => write!(f, "invalid credentials"),
            ErrorCategory::AuthTwoFactorRequired => write!(f, "two-factor authentication required"),
            ErrorCategory::AuthOther => write!(f, "login error"),
            ErrorCategory::TargetNotFound => write!(f, "profile not found"),
            ErrorCategory::TargetPrivateNotFollowed => write!(f, "private profile"),
            ErrorCategory::TransferOther => write!(f, "download error"),
            ErrorCategory::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}
