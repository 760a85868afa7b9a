//! Login handshake helpers.

use regex::Regex;

use crate::api::types::LoginResponse;
use crate::error::{Error, Result};

/// Format a password the way the web login form submits it.
///
/// Version 0 of the browser scheme sends the password in plain text,
/// prefixed with the submission time in seconds.
pub fn format_enc_password(password: &str, timestamp: i64) -> String {
    format!("#PWD_INSTAGRAM_BROWSER:0:{}:{}", timestamp, password)
}

/// Find the CSRF token embedded in a page's shared data.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let pattern = Regex::new(r#""csrf_token"\s*:\s*"([A-Za-z0-9]+)""#).ok()?;
    pattern
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Map a login response to success or the matching error.
pub fn check_login_response(response: &LoginResponse) -> Result<()> {
    if response.two_factor_required {
        return Err(Error::TwoFactorRequired);
    }

    if response.authenticated {
        return Ok(());
    }

    if let Some(message) = response.message.as_deref() {
        if message == "checkpoint_required" {
            let url = response.checkpoint_url.as_deref().unwrap_or("(no url)");
            return Err(Error::Authentication(format!(
                "Checkpoint required. Point your browser to {} and follow the instructions",
                url
            )));
        }

        if response.status.as_deref() == Some("fail") {
            return Err(Error::Authentication(message.to_string()));
        }
    }

    // Unknown user and wrong password both end up here.
    Err(Error::BadCredentials)
}
