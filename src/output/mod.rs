//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    mask_secret, print_banner, print_config_summary, print_error, print_info, print_success,
    print_user_info, print_warning,
};
pub use progress::{create_item_bar, create_spinner};
pub use stats::{describe_stop, print_collect_stats, print_download_stats};
