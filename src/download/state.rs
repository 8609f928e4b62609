//! Download statistics.

/// Outcome counters of a download batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub saved: u64,
    pub failed: u64,
    pub bytes_written: u64,
}

impl DownloadSummary {
    /// Record a saved file.
    pub fn record_saved(&mut self, bytes: u64) {
        self.saved += 1;
        self.bytes_written += bytes;
    }

    /// Record a failed item.
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Number of settled items.
    pub fn total(&self) -> u64 {
        self.saved + self.failed
    }
}
