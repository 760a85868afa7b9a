//! Instagram web API HTTP client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use reqwest::{header, Client, Response, StatusCode};
use url::Url;

use crate::api::auth::{check_login_response, extract_csrf_token, format_enc_password};
use crate::api::options::SessionOptions;
use crate::api::traits::MediaClient;
use crate::api::types::*;
use crate::config::Config;
use crate::download::{download_profile, TransferStats};
use crate::error::{Error, Result};

/// Instagram website base URL.
const WEB_BASE: &str = "https://www.instagram.com/";

/// Instagram private API base URL, used for profile lookups.
const API_BASE: &str = "https://i.instagram.com/";

/// App ID sent by the Instagram web frontend.
const IG_APP_ID: &str = "936619743392459";

/// GraphQL query returning a page of a profile's posts.
const POSTS_QUERY_HASH: &str = "003056d32c2554def87228bc3fd9668a";

/// GraphQL query returning a single post by shortcode.
const POST_QUERY_HASH: &str = "2b0673e0dc4580674a88d426fe00ea90";

/// Posts per timeline page.
pub const PAGE_SIZE: u32 = 12;

/// Instagram web API client holding one session.
pub struct InstagramApi {
    client: Client,
    options: SessionOptions,
    web_base: Url,
    api_base: Url,
    request_delay: Duration,
    csrf_token: Option<String>,
    username: Option<String>,
}

impl InstagramApi {
    /// Create an anonymous session.
    pub fn new(config: &Config, options: SessionOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.options.user_agent)
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(config.options.connect_timeout_secs))
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            options,
            web_base: Url::parse(WEB_BASE)?,
            api_base: Url::parse(API_BASE)?,
            request_delay: Duration::from_millis(config.options.request_delay_ms),
            csrf_token: None,
            username: None,
        })
    }

    /// Point the session at different hosts.
    pub fn with_base_urls(mut self, web_base: &str, api_base: &str) -> Result<Self> {
        self.web_base = Url::parse(web_base)?;
        self.api_base = Url::parse(api_base)?;
        Ok(self)
    }

    /// Feature toggles of this session.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Username of the logged-in account, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Sleep a randomized interval between paginated requests.
    pub async fn pace(&self) {
        let base = self.request_delay.as_millis() as u64;
        if base == 0 {
            return;
        }
        let delay_ms = rand::thread_rng().gen_range(base..base * 2);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    /// Build common headers for API requests.
    fn build_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        headers.insert("x-ig-app-id", header::HeaderValue::from_static(IG_APP_ID));
        headers.insert(
            "x-requested-with",
            header::HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(
            header::REFERER,
            header::HeaderValue::from_str(self.web_base.as_str())
                .map_err(|e| Error::Api(format!("Invalid referer: {}", e)))?,
        );

        if let Some(token) = &self.csrf_token {
            headers.insert(
                "x-csrftoken",
                header::HeaderValue::from_str(token)
                    .map_err(|e| Error::Api(format!("Invalid CSRF token: {}", e)))?,
            );
        }

        Ok(headers)
    }

    /// Make a GET request with session headers.
    async fn get(&self, url: Url) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .headers(self.build_headers()?)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }

        Ok(response)
    }

    /// Fetch the CSRF token the login form needs.
    async fn fetch_csrf_token(&self) -> Result<String> {
        let response = self.get(self.web_base.clone()).await?;

        if let Some(token) = csrf_cookie(&response) {
            return Ok(token);
        }

        let body = response.text().await?;
        extract_csrf_token(&body)
            .ok_or_else(|| Error::Authentication("Could not obtain a CSRF token".into()))
    }

    /// Get one page of a profile's posts.
    pub async fn get_timeline(&self, profile: &Profile, cursor: &str) -> Result<MediaConnection> {
        let variables = serde_json::json!({
            "id": profile.id,
            "first": PAGE_SIZE,
            "after": cursor,
        });

        let mut url = self.web_base.join("graphql/query/")?;
        url.query_pairs_mut()
            .append_pair("query_hash", POSTS_QUERY_HASH)
            .append_pair("variables", &variables.to_string());

        let response = self.get(url).await?;
        let status = response.status();

        if (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
            && profile.is_private
        {
            return Err(Error::PrivateProfileNotFollowed(profile.username.clone()));
        }

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to get timeline: HTTP {}",
                status
            )));
        }

        let text = response.text().await?;
        let page: TimelinePageResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse timeline: {} - Response: {}",
                e,
                body_excerpt(&text)
            ))
        })?;

        page.data
            .user
            .map(|user| user.edge_owner_to_timeline_media)
            .ok_or_else(|| Error::Api("Timeline response contained no user".into()))
    }

    /// Get the full node of a single post.
    pub async fn get_post(&self, shortcode: &str) -> Result<PostNode> {
        let variables = serde_json::json!({ "shortcode": shortcode });

        let mut url = self.web_base.join("graphql/query/")?;
        url.query_pairs_mut()
            .append_pair("query_hash", POST_QUERY_HASH)
            .append_pair("variables", &variables.to_string());

        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to get post {}: HTTP {}",
                shortcode, status
            )));
        }

        let text = response.text().await?;
        let post: PostDetailsResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!("Failed to parse post {}: {}", shortcode, e))
        })?;

        post.data
            .shortcode_media
            .ok_or_else(|| Error::Api(format!("Post {} not found", shortcode)))
    }

    /// Start downloading a file.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl MediaClient for InstagramApi {
    async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.csrf_token = Some(self.fetch_csrf_token().await?);

        let url = self.web_base.join("api/v1/web/accounts/login/ajax/")?;
        let enc_password = format_enc_password(password, Utc::now().timestamp());

        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .headers(self.build_headers()?)
            .form(&[
                ("username", username),
                ("enc_password", enc_password.as_str()),
                ("queryParams", "{}"),
                ("optIntoOneTap", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Login response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }

        // The token rotates once the session is authenticated.
        let rotated_token = csrf_cookie(&response);

        // Failed logins come back as 400 with a JSON body, so parse regardless.
        let text = response.text().await?;
        let login: LoginResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Authentication(format!(
                "Unexpected login response (HTTP {}): {}",
                status, e
            ))
        })?;

        check_login_response(&login)?;

        if let Some(token) = rotated_token {
            self.csrf_token = Some(token);
        }
        self.username = Some(username.to_string());

        tracing::debug!("Logged in as {}", username);
        Ok(())
    }

    async fn profile(&self, username: &str) -> Result<Profile> {
        let mut url = self.api_base.join("api/v1/users/web_profile_info/")?;
        url.query_pairs_mut().append_pair("username", username);

        let response = self.get(url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::ProfileNotFound(username.to_string()));
        }

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to fetch profile: HTTP {}",
                status
            )));
        }

        let text = response.text().await?;
        let info: ProfileInfoResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse profile: {} - Response: {}",
                e,
                body_excerpt(&text)
            ))
        })?;

        info.data
            .user
            .map(Profile::from)
            .ok_or_else(|| Error::ProfileNotFound(username.to_string()))
    }

    async fn download_profile(&self, profile: &Profile, dest: &Path) -> Result<TransferStats> {
        download_profile(self, profile, dest).await
    }
}

/// Value of a `csrftoken` cookie set by a response.
fn csrf_cookie(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == "csrftoken")
        .map(|cookie| cookie.value().to_string())
}

/// First 500 characters of a response body, for error messages.
fn body_excerpt(text: &str) -> String {
    text.chars().take(500).collect()
}
