//! Output paths and the URL list file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Path of the URL list for a user: `<dir>/weibo-<uid>.txt`.
pub fn url_list_path(dir: &Path, user_id: &str) -> PathBuf {
    dir.join(format!("weibo-{}.txt", user_id))
}

/// Write the collected URLs, one per line.
pub fn write_url_list<'a, I>(dir: &Path, user_id: &str, urls: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a String>,
{
    let path = url_list_path(dir, user_id);
    let mut file = std::io::BufWriter::new(std::fs::File::create(&path)?);

    for url in urls {
        writeln!(file, "{}", url)?;
    }
    file.flush()?;

    tracing::debug!("Wrote URL list to {}", path.display());
    Ok(path)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
