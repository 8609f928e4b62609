//! Deduplicated set of collected picture URLs.

use std::collections::HashSet;

/// Picture URLs deduplicated by exact string equality.
///
/// Iteration follows first-appearance order so the written URL list is
/// stable between runs over the same feed.
#[derive(Debug, Clone, Default)]
pub struct UrlSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a URL. Returns `false` if it was already present.
    pub fn insert(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.ordered.push(url);
        true
    }

    /// Insert every URL, returning how many were new.
    pub fn extend<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for url in urls {
            if self.insert(url) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ordered.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl IntoIterator for UrlSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}

impl<'a> IntoIterator for &'a UrlSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}

impl FromIterator<String> for UrlSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = UrlSet::new();
        set.extend(iter);
        set
    }
}
