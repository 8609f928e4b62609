//! Picture URL extraction from feed pages.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::types::{FeedPage, Mblog};

/// Image CDN hosts that serve photo attachments (`wx1` to `wx4`).
static CDN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)//wx[1-4]\.sinaimg\.").unwrap());

/// Check whether a URL points at the photo CDN.
pub fn is_cdn_url(url: &str) -> bool {
    CDN_PATTERN.is_match(url)
}

/// Large-rendition URLs of a post and of the post it shares, in order.
///
/// Pictures without a large rendition are skipped.
pub fn mblog_picture_urls(mblog: &Mblog) -> Vec<&str> {
    let mut urls: Vec<&str> = mblog.pics.pictures().filter_map(|p| p.large_url()).collect();

    if let Some(original) = &mblog.retweeted_status {
        urls.extend(original.pics.pictures().filter_map(|p| p.large_url()));
    }

    urls
}

/// Extract the photo URLs of every media post on a page.
pub fn extract_pictures(page: &FeedPage) -> Vec<String> {
    page.cards()
        .iter()
        .filter(|card| card.is_media())
        .filter_map(|card| card.mblog.as_ref())
        .flat_map(mblog_picture_urls)
        .filter(|url| is_cdn_url(url))
        .map(str::to_string)
        .collect()
}
