//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Weibo picture collector CLI.
#[derive(Parser, Debug)]
#[command(
    name = "weibo-pictures",
    version,
    about = "Collect and download the photos of a Weibo user",
    long_about = "Walks a Weibo user's timeline through the mobile API, writes every photo URL \
                  to weibo-<uid>.txt and optionally downloads the images.\n\n\
                  Requires the value of your SUB session cookie."
)]
pub struct Args {
    /// Weibo user id (numeric).
    #[arg(short, long, env = "WEIBO_UID")]
    pub uid: Option<String>,

    /// Value of the SUB session cookie.
    #[arg(short, long, env = "WEIBO_SUB")]
    pub cookie: Option<String>,

    /// Output directory; a folder named after the user id is created inside.
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Number of concurrent downloads.
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Download the images, not only the URL list.
    #[arg(short, long)]
    pub output_file: bool,

    /// Milliseconds to wait between feed pages.
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Maximum number of feed pages to query.
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Browser user agent string.
    #[arg(long = "user-agent", env = "WEIBO_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Path to configuration file.
    #[arg(long, default_value = "weibo.toml")]
    pub config: PathBuf,

    /// Hide the download progress bar.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(uid) = &self.uid {
            config.account.user_id = uid.trim().to_string();
        }

        if let Some(cookie) = &self.cookie {
            config.account.session_token = cookie.trim().to_string();
        }

        if let Some(user_agent) = &self.user_agent {
            config.account.user_agent = user_agent.clone();
        }

        if let Some(dir) = &self.directory {
            config.options.directory = Some(dir.clone());
        }

        if let Some(threads) = self.threads {
            config.options.threads = threads;
        }

        if let Some(interval) = self.interval {
            config.options.interval_ms = interval;
        }

        if let Some(limit) = self.limit {
            config.options.page_limit = Some(limit);
        }

        // Boolean flags (only override if set to non-default)
        if self.output_file {
            config.options.download_images = true;
        }
    }
}
