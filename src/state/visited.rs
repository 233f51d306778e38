use crate::url::canonicalize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use url::Url;

/// Set of URLs already claimed for crawling
///
/// The set is the single authority on whether a URL is new. It offers no
/// separate membership query: callers learn about a URL only by trying to
/// claim it, so a check and an insert can never be split across two calls.
///
/// Cloning is cheap and yields a handle to the same underlying set.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for crawling
    ///
    /// Returns `true` for exactly one call per canonical URL over the lifetime
    /// of the set; every other call, concurrent or later, returns `false`.
    pub fn claim(&self, url: &Url) -> bool {
        let key = canonicalize(url).to_string();
        // A panic while holding the lock cannot leave a half-inserted entry,
        // so a poisoned set is still consistent.
        let mut set = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        set.insert(key)
    }

    /// Number of URLs claimed so far
    pub fn claimed_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
