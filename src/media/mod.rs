//! Media module for picture extraction and URL collection.

pub mod extractor;
pub mod url_set;

pub use extractor::{extract_pictures, is_cdn_url, mblog_picture_urls};
pub use url_set::UrlSet;
