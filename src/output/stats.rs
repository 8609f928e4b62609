//! Statistics reporting.

use std::path::Path;

use console::style;

use crate::download::{CollectOutcome, DownloadSummary, StopReason};

/// Describe why the collector stopped.
pub fn describe_stop(reason: &StopReason) -> String {
    match reason {
        StopReason::Rejected { ok, message } => match message {
            Some(msg) => format!("API returned ok={} ({})", ok, msg),
            None => format!("API returned ok={}", ok),
        },
        StopReason::FetchFailed(e) => format!("request failed: {}", e),
        StopReason::PageLimit(limit) => format!("page limit of {} reached", limit),
    }
}

/// Print the result of the collection phase.
pub fn print_collect_stats(outcome: &CollectOutcome, list_path: &Path) {
    println!();
    println!("{}", style("Collection:").bold());
    println!("  Pages:    {}", outcome.pages_fetched);
    println!("  Pictures: {}", style(outcome.urls.len()).green());
    println!("  Stopped:  {}", describe_stop(&outcome.stop_reason));
    println!("  URL list: {}", list_path.display());
}

/// Print the result of the download phase.
pub fn print_download_stats(summary: &DownloadSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Download Statistics:").bold());
    println!("  Saved:  {}", style(summary.saved).green());
    if summary.failed > 0 {
        println!("  Failed: {}", style(summary.failed).red());
    }
    println!("  Bytes:  {}", indicatif::HumanBytes(summary.bytes_written));
    println!("  Total:  {} processed", summary.total());
    println!("{}", style("═".repeat(50)).dim());
}
