//! Feed pagination and picture URL collection.

use tokio::time::sleep;

use crate::api::PageSource;
use crate::config::Config;
use crate::media::{extract_pictures, UrlSet};

/// Number of feed entries requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Why the collector stopped paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The API answered with `ok != 1` (end of feed, private account, rate limit...).
    Rejected { ok: i64, message: Option<String> },
    /// The page could not be fetched or parsed.
    FetchFailed(String),
    /// The configured page limit was reached.
    PageLimit(u32),
}

/// Result of walking the feed.
#[derive(Debug)]
pub struct CollectOutcome {
    pub urls: UrlSet,
    /// Number of page fetch calls made, including the one that stopped the loop.
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
}

/// Walk the user's feed page by page and collect every photo URL.
///
/// Never fails: any stop condition ends the walk and the URLs gathered so
/// far are returned.
pub async fn collect_picture_urls<S>(source: &S, config: &Config) -> CollectOutcome
where
    S: PageSource + ?Sized,
{
    let user_id = config.account.user_id.as_str();
    let limit = config.options.page_limit;
    let interval = config.interval();

    let mut urls = UrlSet::new();
    let mut page: u32 = 1;
    let mut pages_fetched: u32 = 0;

    tracing::info!("Collecting pictures of user {}...", user_id);

    let stop_reason = loop {
        if let Some(limit) = limit {
            if page > limit {
                tracing::info!("Page limit of {} reached", limit);
                break StopReason::PageLimit(limit);
            }
        }

        pages_fetched += 1;
        let feed = match source.fetch_page(user_id, page, PAGE_SIZE).await {
            Ok(feed) => feed,
            Err(e) => {
                tracing::warn!("Failed to fetch page {}: {}", page, e);
                break StopReason::FetchFailed(e.to_string());
            }
        };

        if !feed.is_ok() {
            tracing::info!(
                "Feed ended at page {} (ok={}{})",
                page,
                feed.ok,
                feed.msg
                    .as_deref()
                    .map(|m| format!(", {}", m))
                    .unwrap_or_default()
            );
            break StopReason::Rejected {
                ok: feed.ok,
                message: feed.msg,
            };
        }

        let added = urls.extend(extract_pictures(&feed));
        tracing::info!(
            "Page: {}, pictures: {} (+{})",
            page,
            urls.len(),
            added
        );

        // No point waiting when the limit ends the walk anyway.
        if limit.map_or(true, |limit| page < limit) {
            sleep(interval).await;
        }
        page += 1;
    };

    CollectOutcome {
        urls,
        pages_fetched,
        stop_reason,
    }
}
