//! Filename derivation and validation.

use url::Url;

use crate::error::{Error, Result};

/// Reject names that cannot be a file inside the output directory.
fn check_filename(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(Error::InvalidFilename("Filename cannot be empty".to_string()));
    }

    if name.chars().all(|c| c == '.') {
        return Err(Error::InvalidFilename(format!(
            "Dot-only filename not allowed: '{}'",
            name
        )));
    }

    Ok(name)
}

/// Derive the output filename from a (resolved) image URL.
///
/// The name is the trailing run of ASCII alphanumerics and periods of the
/// URL path, so `/large/006abc.jpg` becomes `006abc.jpg`.
pub fn filename_from_url(url: &Url) -> Result<String> {
    let path = url.path();
    let start = path
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '.')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(path.len());

    check_filename(&path[start..])
        .map(str::to_string)
        .map_err(|e| match e {
            Error::InvalidFilename(msg) => {
                Error::InvalidFilename(format!("{} (from URL {})", msg, url))
            }
            other => other,
        })
}
