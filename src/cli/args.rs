//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Instagram media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "instagram-downloader",
    version,
    about = "Download all pictures and videos from an Instagram account"
)]
pub struct Args {
    /// Instagram username to download media from.
    pub username: String,

    /// Directory to save media (default: username).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Instagram username for login.
    #[arg(short = 'u', long = "login-user", env = "INSTAGRAM_USER")]
    pub login_user: Option<String>,

    /// Instagram password for login.
    #[arg(
        short = 'p',
        long = "login-pass",
        env = "INSTAGRAM_PASS",
        hide_env_values = true
    )]
    pub login_pass: Option<String>,

    /// Path to an optional configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Browser user agent string.
    #[arg(long = "user-agent")]
    pub user_agent: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        config.target = self.username;

        if let Some(dir) = self.output {
            config.options.output_directory = Some(dir);
        }

        if let Some(user) = self.login_user {
            config.account.username = Some(user);
        }

        if let Some(pass) = self.login_pass {
            config.account.password = Some(pass);
        }

        if let Some(user_agent) = self.user_agent {
            config.options.user_agent = user_agent;
        }
    }
}
