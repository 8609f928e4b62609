//! Seams between the API client and the collection/download logic.

use async_trait::async_trait;
use url::Url;

use crate::api::types::FeedPage;
use crate::error::Result;

/// Something that can return pages of a user's feed.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch feed page `page` (1-based) of `user_id`.
    async fn fetch_page(&self, user_id: &str, page: u32, page_size: u32) -> Result<FeedPage>;
}

/// A fetched image body together with the URL it was served from.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// Resolved URL after redirects.
    pub final_url: Url,
    pub bytes: Vec<u8>,
}

/// Something that can fetch an image by URL.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage>;
}
