//! Download of one account, from login to the last file.
//!
//! Every phase returns a `Result`; `download_account` catches each error at
//! the phase it came from, prints one line for it and turns it into an
//! [`Outcome`]. Nothing propagates past this module.
//!
//! The destination is handed to the client explicitly, so the process
//! working directory is never changed.

use std::path::{Path, PathBuf};

use crate::api::MediaClient;
use crate::config::validation::validate_target;
use crate::config::Config;
use crate::download::TransferStats;
use crate::error::{exit_codes, Error, ErrorCategory, Result};
use crate::fs::prepare_destination;
use crate::output::{print_error, print_info, print_success, print_transfer_stats, print_warning};

/// Username and password for a login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// What to download and where.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub target: String,
    pub destination: Option<PathBuf>,
    pub credentials: Option<Credentials>,
}

impl DownloadRequest {
    /// Anonymous request saving into a directory named after the target.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            destination: None,
            credentials: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            target: config.target.clone(),
            destination: config.options.output_directory.clone(),
            credentials: config.credentials().map(|(username, password)| Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }),
        }
    }

    /// Directory the media ends up in.
    pub fn destination(&self) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.target))
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All media saved; holds the absolute destination path.
    Success(PathBuf),
    Failure(ErrorCategory),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success(_) => exit_codes::SUCCESS,
            Outcome::Failure(_) => exit_codes::FAILURE,
        }
    }

    fn failure(category: ErrorCategory, message: &str) -> Self {
        tracing::debug!("Failing with category: {}", category);
        print_error(message);
        Outcome::Failure(category)
    }
}

/// Build an anonymous session for the configured options.
#[cfg(feature = "web-client")]
pub fn connect(config: &Config) -> Result<Box<dyn MediaClient>> {
    use crate::api::{InstagramApi, SessionOptions};

    let api = InstagramApi::new(config, SessionOptions::default())?;
    Ok(Box::new(api))
}

/// Build an anonymous session for the configured options.
#[cfg(not(feature = "web-client"))]
pub fn connect(_config: &Config) -> Result<Box<dyn MediaClient>> {
    Err(Error::MissingDependency)
}

/// Connect and download the configured account.
pub async fn run(config: &Config) -> Outcome {
    let partial_login = config.credentials().is_none()
        && (config.account.username.is_some() || config.account.password.is_some());
    if partial_login {
        print_warning("Both a login user and a login password are needed; continuing without login");
    }

    let mut client = match connect(config) {
        Ok(client) => client,
        Err(e @ Error::MissingDependency) => {
            return Outcome::failure(ErrorCategory::MissingDependency, &format!("Error: {}", e))
        }
        Err(e) => {
            return Outcome::failure(ErrorCategory::Unexpected, &format!("Unexpected error: {}", e))
        }
    };

    download_account(client.as_mut(), &DownloadRequest::from_config(config)).await
}

/// Log in if asked, prepare the destination, then resolve and download the target.
pub async fn download_account<C: MediaClient + ?Sized>(
    client: &mut C,
    request: &DownloadRequest,
) -> Outcome {
    if let Err(e) = validate_target(&request.target) {
        return Outcome::failure(ErrorCategory::Unexpected, &format!("Unexpected error: {}", e));
    }

    if let Some(credentials) = &request.credentials {
        print_info(&format!("Logging in as {}...", credentials.username));

        if let Err(e) = client
            .login(&credentials.username, &credentials.password)
            .await
        {
            let category = ErrorCategory::from_login_error(&e);
            let message = match category {
                ErrorCategory::AuthOther => format!("Login error: {}", e),
                _ => format!("Error: {}", e),
            };
            return Outcome::failure(category, &message);
        }

        print_success("Login successful!");
    }

    let destination = match prepare_destination(&request.destination()) {
        Ok(path) => path,
        Err(e) => {
            return Outcome::failure(ErrorCategory::Unexpected, &format!("Unexpected error: {}", e))
        }
    };
    tracing::debug!("Saving media into {}", destination.display());

    match transfer(client, &request.target, &destination).await {
        Ok(stats) => {
            print_transfer_stats(&request.target, &stats);
            println!();
            print_success(&format!(
                "Download complete! Media saved to: {}",
                destination.display()
            ));
            Outcome::Success(destination)
        }
        Err(e) => {
            let category = ErrorCategory::from_transfer_error(&e);
            let message = match category {
                ErrorCategory::TransferOther => format!("Error downloading profile: {}", e),
                _ => format!("Error: {}", e),
            };
            Outcome::failure(category, &message)
        }
    }
}

async fn transfer<C: MediaClient + ?Sized>(
    client: &C,
    target: &str,
    destination: &Path,
) -> Result<TransferStats> {
    print_info(&format!("Fetching profile for {}...", target));
    let profile = client.profile(target).await?;

    print_info(&format!("Downloading media from {}...", target));
    client.download_profile(&profile, destination).await
}
