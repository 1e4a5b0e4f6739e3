use crate::models::{MatchResult, SiteKey};
use std::collections::HashMap;

/// Memoized search results for one matching run. Entries are never evicted.
#[derive(Debug, Default)]
pub struct MatchCache {
    entries: HashMap<SiteKey, MatchResult>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SiteKey) -> Option<&MatchResult> {
        self.entries.get(key)
    }

    /// Return the stored result for `key`, computing and storing it on first use.
    /// The second element is true when the result came from the cache.
    pub fn get_or_compute<F>(&mut self, key: SiteKey, compute: F) -> (&MatchResult, bool)
    where
        F: FnOnce() -> MatchResult,
    {
        use std::collections::hash_map::Entry;

        match self.entries.entry(key) {
            Entry::Occupied(entry) => (entry.into_mut(), true),
            Entry::Vacant(entry) => (entry.insert(compute()), false),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
