//! Weibo Pictures - collect and download the photos of a Weibo user.
//!
//! This library walks a user's timeline through the mobile container API,
//! extracts the photo attachments of every media post (including shared
//! posts) and downloads them with a bounded worker pool.
//!
//! # Features
//!
//! - Sequential feed pagination with a configurable delay and page limit
//! - Normalization of the API's array-or-object picture lists
//! - Deduplicated URL list written to `weibo-<uid>.txt`
//! - Concurrent downloads with per-item failure isolation and progress
//!
//! # Example
//!
//! ```no_run
//! use weibo_pictures::{collect_picture_urls, Config, WeiboApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.account.user_id = "1669879400".into();
//!     config.account.session_token = "your SUB cookie".into();
//!
//!     let api = WeiboApi::new(
//!         config.account.session_token.clone(),
//!         &config.account.user_agent,
//!     )?;
//!     let outcome = collect_picture_urls(&api, &config).await;
//!     println!("{} pictures", outcome.urls.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{ImageFetcher, PageSource, WeiboApi};
pub use config::Config;
pub use download::{
    collect_picture_urls, download_all, download_with_progress, CollectOutcome, DownloadResult,
    DownloadSummary, StopReason,
};
pub use error::{Error, Result};
pub use media::UrlSet;
