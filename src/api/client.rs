//! Weibo mobile API HTTP client.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use url::Url;

use crate::api::source::{FetchedImage, ImageFetcher, PageSource};
use crate::api::types::{FeedPage, ProfileResponse, UserInfo};
use crate::error::{Error, Result};

/// Weibo mobile site base URL.
const API_BASE: &str = "https://m.weibo.cn";

/// Container index endpoint, used for both profile and feed queries.
const CONTAINER_PATH: &str = "/api/container/getIndex";

/// Prefix of the container id of a user's post feed.
pub const FEED_CONTAINER_PREFIX: &str = "107603";

/// Weibo API client holding the session cookie.
#[derive(Debug, Clone)]
pub struct WeiboApi {
    client: Client,
    base_url: String,
    session_token: String,
}

impl WeiboApi {
    /// Create a new API client against the public endpoint.
    pub fn new(session_token: String, user_agent: &str) -> Result<Self> {
        Self::with_base_url(API_BASE, session_token, user_agent)
    }

    /// Create a client against another base URL (mock servers, mirrors).
    pub fn with_base_url(base_url: &str, session_token: String, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token,
        })
    }

    fn container_url(&self) -> String {
        format!("{}{}", self.base_url, CONTAINER_PATH)
    }

    /// Send a prepared request and reject non-2xx statuses.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::Api(format!("HTTP {} from {}", status, response.url())));
        }

        Ok(response)
    }

    /// Get profile metadata for a user. One-shot, no pagination.
    pub async fn get_user_info(&self, user_id: &str) -> Result<UserInfo> {
        let url = self.container_url();
        tracing::debug!("GET {} (profile of {})", url, user_id);

        let request = self
            .client
            .get(&url)
            .query(&[("type", "uid"), ("value", user_id)]);
        let text = self.send(request).await?.text().await?;

        let response: ProfileResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse user info: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })?;

        if response.ok != 1 {
            return Err(Error::AccountNotFound(user_id.to_string()));
        }

        response
            .data
            .and_then(|d| d.user_info)
            .ok_or_else(|| Error::AccountNotFound(user_id.to_string()))
    }

    /// Fetch one page of the user's feed.
    ///
    /// An application-level rejection comes back as a page with `ok != 1`;
    /// only transport, status and JSON failures are errors.
    pub async fn fetch_page(&self, user_id: &str, page: u32, page_size: u32) -> Result<FeedPage> {
        let url = self.container_url();
        let container_id = format!("{}{}", FEED_CONTAINER_PREFIX, user_id);
        let page_param = page.to_string();
        let count_param = page_size.to_string();

        tracing::debug!("GET {} (page {} of {})", url, page, container_id);

        let request = self
            .client
            .get(&url)
            .query(&[
                ("type", "uid"),
                ("containerid", container_id.as_str()),
                ("page", page_param.as_str()),
                ("count", count_param.as_str()),
            ])
            .header(header::COOKIE, format!("SUB={}", self.session_token));
        let text = self.send(request).await?.text().await?;

        let feed: FeedPage = serde_json::from_str(&text)?;
        tracing::debug!(
            "Feed page {}: ok={}, {} cards",
            page,
            feed.ok,
            feed.cards().len()
        );

        Ok(feed)
    }

    /// Download a file, following redirects.
    pub async fn download_file(&self, url: &str) -> Result<FetchedImage> {
        let url = Url::parse(url)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Download(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        let final_url = response.url().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Download(format!("Failed to read body: {}", e)))?;

        Ok(FetchedImage {
            final_url,
            bytes: bytes.to_vec(),
        })
    }
}

#[async_trait]
impl PageSource for WeiboApi {
    async fn fetch_page(&self, user_id: &str, page: u32, page_size: u32) -> Result<FeedPage> {
        WeiboApi::fetch_page(self, user_id, page, page_size).await
    }
}

#[async_trait]
impl ImageFetcher for WeiboApi {
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage> {
        self.download_file(url).await
    }
}
