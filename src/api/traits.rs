//! Client abstraction used by the orchestrator.

use std::path::Path;

use async_trait::async_trait;

use crate::api::types::Profile;
use crate::download::TransferStats;
use crate::error::Result;

/// Operations the downloader needs from an Instagram session.
///
/// `login` fails with `Error::BadCredentials` or `Error::TwoFactorRequired`
/// for those cases. `profile` fails with `Error::ProfileNotFound`, and
/// `download_profile` with `Error::PrivateProfileNotFollowed` when the
/// session may not see the profile's posts.
#[async_trait]
pub trait MediaClient: Send + Sync {
    /// Log in with a username and password.
    async fn login(&mut self, username: &str, password: &str) -> Result<()>;

    /// Resolve a username into a profile.
    async fn profile(&self, username: &str) -> Result<Profile>;

    /// Download the profile picture and all post media into `dest`.
    async fn download_profile(&self, profile: &Profile, dest: &Path) -> Result<TransferStats>;
}
