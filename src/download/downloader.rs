//! Bounded-concurrency image downloading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::{Stream, StreamExt};
use indicatif::ProgressDrawTarget;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, Mutex};

use crate::api::ImageFetcher;
use crate::download::state::DownloadSummary;
use crate::error::{Error, Result};
use crate::fs::filename_from_url;
use crate::output::create_item_bar;

/// Outcome of one URL.
#[derive(Debug)]
pub enum DownloadResult {
    Saved {
        url: String,
        path: PathBuf,
        bytes: u64,
    },
    Failed {
        url: String,
        error: Error,
    },
}

impl DownloadResult {
    pub fn url(&self) -> &str {
        match self {
            DownloadResult::Saved { url, .. } | DownloadResult::Failed { url, .. } => url,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadResult::Saved { .. })
    }
}

/// Download every URL into `output_dir` with at most `concurrency` requests
/// in flight.
///
/// `concurrency` workers pull from a shared queue and report on a channel;
/// the returned stream yields one result per URL, in completion order, and
/// ends once every worker is done. Must be called inside a tokio runtime.
pub fn download_all<F>(
    fetcher: Arc<F>,
    urls: Vec<String>,
    output_dir: PathBuf,
    concurrency: usize,
) -> impl Stream<Item = DownloadResult>
where
    F: ImageFetcher + ?Sized + 'static,
{
    let workers = concurrency.max(1).min(urls.len().max(1));
    let queue = Arc::new(Mutex::new(urls.into_iter()));
    let (tx, rx) = mpsc::channel(workers);

    for worker in 0..workers {
        let queue = Arc::clone(&queue);
        let fetcher = Arc::clone(&fetcher);
        let output_dir = output_dir.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            loop {
                let next = queue.lock().await.next();
                let Some(url) = next else { break };

                let result = download_one(fetcher.as_ref(), url, &output_dir).await;
                if tx.send(result).await.is_err() {
                    // Receiver dropped, nobody is listening anymore.
                    break;
                }
            }
            tracing::debug!("Download worker {} finished", worker);
        });
    }
    drop(tx);

    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|result| (result, rx))
    })
}

/// Download all URLs while ticking a progress bar, one tick per settled item.
pub async fn download_with_progress<F>(
    fetcher: Arc<F>,
    urls: Vec<String>,
    output_dir: &Path,
    concurrency: usize,
    show_progress: bool,
) -> DownloadSummary
where
    F: ImageFetcher + ?Sized + 'static,
{
    let bar = create_item_bar(urls.len() as u64, "Downloading");
    if !show_progress {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }

    let mut summary = DownloadSummary::default();
    let mut results = std::pin::pin!(download_all(
        fetcher,
        urls,
        output_dir.to_path_buf(),
        concurrency
    ));

    while let Some(result) = results.next().await {
        match &result {
            DownloadResult::Saved { path, bytes, .. } => {
                tracing::debug!("Saved {} ({} bytes)", path.display(), bytes);
                summary.record_saved(*bytes);
            }
            DownloadResult::Failed { url, error } => {
                bar.suspend(|| tracing::warn!("Failed to download {}: {}", url, error));
                summary.record_failed();
            }
        }
        bar.inc(1);
    }

    bar.finish_and_clear();
    summary
}

async fn download_one<F>(fetcher: &F, url: String, output_dir: &Path) -> DownloadResult
where
    F: ImageFetcher + ?Sized,
{
    match save_image(fetcher, &url, output_dir).await {
        Ok((path, bytes)) => DownloadResult::Saved { url, path, bytes },
        Err(error) => DownloadResult::Failed { url, error },
    }
}

/// Fetch one image and write it under the name taken from its resolved URL.
async fn save_image<F>(fetcher: &F, url: &str, output_dir: &Path) -> Result<(PathBuf, u64)>
where
    F: ImageFetcher + ?Sized,
{
    let image = fetcher.fetch_image(url).await?;
    let filename = filename_from_url(&image.final_url)?;
    let path = output_dir.join(filename);

    write_file(&path, &image.bytes).await?;

    Ok((path, image.bytes.len() as u64))
}

/// The handle is dropped when this returns, on success or error.
async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchedImage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use url::Url;

    /// Serves `url` bytes after a delay, tracking how many fetches overlap.
    #[derive(Default)]
    struct SlowFetcher {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay_ms: u64,
    }

    #[async_trait]
    impl ImageFetcher for SlowFetcher {
        async fn fetch_image(&self, url: &str) -> Result<FetchedImage> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if url.contains("broken") {
                return Err(Error::Download("HTTP 404".into()));
            }

            Ok(FetchedImage {
                final_url: Url::parse(url)?,
                bytes: url.as_bytes().to_vec(),
            })
        }
    }

    /// Pretends every request was redirected to another host and path.
    struct RedirectingFetcher;

    #[async_trait]
    impl ImageFetcher for RedirectingFetcher {
        async fn fetch_image(&self, url: &str) -> Result<FetchedImage> {
            let name = url.rsplit('/').next().unwrap_or_default();
            Ok(FetchedImage {
                final_url: Url::parse(&format!("https://cdn.example.com/mirror/r_{}", name))?,
                bytes: vec![0xFF, 0xD8, 0xFF],
            })
        }
    }

    fn urls(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("https://wx1.sinaimg.cn/large/img{}.jpg", i))
            .collect()
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(SlowFetcher {
            delay_ms: 20,
            ..Default::default()
        });

        let results: Vec<_> =
            download_all(Arc::clone(&fetcher), urls(12), dir.path().to_path_buf(), 3)
                .collect()
                .await;

        assert_eq!(results.len(), 12);
        assert!(results.iter().all(DownloadResult::is_saved));
        assert!(fetcher.max_in_flight.load(Ordering::SeqCst) <= 3);
        assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_single_worker_is_sequential() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(SlowFetcher {
            delay_ms: 5,
            ..Default::default()
        });

        let summary =
            download_with_progress(Arc::clone(&fetcher), urls(5), dir.path(), 1, false).await;

        assert_eq!(summary.saved, 5);
        assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(SlowFetcher::default());
        let mut list = urls(4);
        list.insert(1, "https://wx1.sinaimg.cn/large/broken.jpg".to_string());
        list.push("https://wx1.sinaimg.cn/large/".to_string());

        let summary = download_with_progress(fetcher, list, dir.path(), 2, false).await;

        assert_eq!(summary.saved, 4);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.total(), 6);
        for i in 0..4 {
            let path = dir.path().join(format!("img{}.jpg", i));
            assert!(path.exists(), "missing {}", path.display());
        }
    }

    #[tokio::test]
    async fn test_written_bytes_and_names() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://wx2.sinaimg.cn/large/006abc.jpg".to_string();

        let results: Vec<_> = download_all(
            Arc::new(SlowFetcher::default()),
            vec![url.clone()],
            dir.path().to_path_buf(),
            4,
        )
        .collect()
        .await;

        match &results[..] {
            [DownloadResult::Saved { url: saved, path, bytes }] => {
                assert_eq!(saved, &url);
                assert_eq!(path, &dir.path().join("006abc.jpg"));
                assert_eq!(*bytes, url.len() as u64);
                assert_eq!(std::fs::read(path).unwrap(), url.as_bytes());
            }
            other => panic!("unexpected results: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_filename_comes_from_resolved_url() {
        let dir = tempfile::tempdir().unwrap();

        let summary = download_with_progress(
            Arc::new(RedirectingFetcher),
            vec!["https://wx1.sinaimg.cn/large/abc.jpg".to_string()],
            dir.path(),
            2,
            false,
        )
        .await;

        assert_eq!(summary.saved, 1);
        // `_` is not part of the trailing name run.
        assert!(dir.path().join("abc.jpg").exists());
    }

    #[tokio::test]
    async fn test_write_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let results: Vec<_> = download_all(
            Arc::new(SlowFetcher::default()),
            urls(3),
            missing,
            2,
        )
        .collect()
        .await;

        assert_eq!(results.len(), 3);
        assert!(results
            .iter()
            .all(|r| matches!(r, DownloadResult::Failed { error: Error::Io(_), .. })));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let summary = download_with_progress(
            Arc::new(SlowFetcher::default()),
            Vec::new(),
            dir.path(),
            4,
            false,
        )
        .await;
        assert_eq!(summary, DownloadSummary::default());
    }
}
