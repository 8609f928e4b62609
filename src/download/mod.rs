//! Download module for picture collection and downloading.
//!
//! This module provides:
//! - Feed pagination and URL collection
//! - Bounded-concurrency image downloading
//! - Download statistics

pub mod downloader;
pub mod pagination;
pub mod state;

pub use downloader::{download_all, download_with_progress, DownloadResult};
pub use pagination::{collect_picture_urls, CollectOutcome, StopReason, PAGE_SIZE};
pub use state::DownloadSummary;
