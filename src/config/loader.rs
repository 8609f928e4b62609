//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Target account and session credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Numeric Weibo user id whose pictures are collected.
    #[serde(default)]
    pub user_id: String,

    /// Value of the `SUB` session cookie.
    #[serde(default)]
    pub session_token: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Collection and download options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base output directory; a per-user folder is created inside it.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Number of concurrent image downloads.
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Milliseconds to wait between feed pages.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Maximum number of feed pages to query.
    #[serde(default)]
    pub page_limit: Option<u32>,

    /// Whether to download the images in addition to writing the URL list.
    #[serde(default)]
    pub download_images: bool,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            session_token: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            directory: None,
            threads: default_threads(),
            interval_ms: default_interval_ms(),
            page_limit: None,
            download_images: false,
        }
    }
}

pub(crate) fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0.3987.122 Safari/537.36".to_string()
}

fn default_threads() -> usize {
    10
}

fn default_interval_ms() -> u64 {
    1200
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Effective output directory: `<directory>/<user_id>`.
    pub fn output_directory(&self) -> PathBuf {
        let base = self
            .options
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(&self.account.user_id)
    }

    /// Delay between two page fetches.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.options.interval_ms)
    }
}
