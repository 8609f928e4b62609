//! Filesystem module.
//!
//! Provides:
//! - Output directory and URL list management
//! - Filename derivation and validation

pub mod naming;
pub mod paths;

pub use naming::filename_from_url;
pub use paths::{ensure_dir, url_list_path, write_url_list};
