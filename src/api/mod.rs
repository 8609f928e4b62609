//! Weibo API module.
//!
//! This module provides:
//! - HTTP client for the mobile container API
//! - Traits used by the collector and the downloader
//! - API response types

pub mod client;
pub mod source;
pub mod types;

pub use client::{WeiboApi, FEED_CONTAINER_PREFIX};
pub use source::{FetchedImage, ImageFetcher, PageSource};
pub use types::*;
