//! Per-pass memoizing identifier cache.
//!
//! One [`IdCache`] lives for exactly one import or export pass. On export it is
//! keyed by internal branch/relationship ids and yields CSAF product IDs; on
//! import it is keyed by CSAF product IDs and yields internal ids. Sharing the
//! instance between the product tree and the reference sections is what makes a
//! version and every status list that mentions it agree on one identifier.

use indexmap::IndexMap;
use std::collections::HashMap;
use uuid::Uuid;

/// Memoizing map from an external or synthetic key to a generated identifier.
#[derive(Debug, Clone, Default)]
pub struct IdCache {
    /// Prefix for minted identifiers (e.g. `CSAFPID-`)
    prefix: String,
    /// Keys resolved during this pass, in first-seen order
    resolved: IndexMap<String, String>,
    /// Identifiers to adopt instead of minting when a key is first resolved
    preferred: HashMap<String, String>,
}

impl IdCache {
    /// Create an empty cache minting bare UUIDs
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache minting `"{prefix}{uuid}"` identifiers
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Create a cache that adopts `preferred` identifiers for known keys.
    ///
    /// Preferred pairs behave as if minted on first resolution. They are not
    /// visible through [`get`](Self::get) before that, so a key that is never
    /// resolved during the pass stays unknown.
    #[must_use]
    pub fn preferring<I, K, V>(prefix: impl Into<String>, preferred: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            resolved: IndexMap::new(),
            preferred: preferred
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, v)| !k.is_empty() && !v.is_empty())
                .collect(),
        }
    }

    /// Resolve a key to its identifier.
    ///
    /// An absent or empty key always yields a fresh identifier and is not
    /// remembered. A key seen before yields the same identifier again.
    pub fn resolve(&mut self, key: Option<&str>) -> String {
        let key = match key {
            Some(k) if !k.is_empty() => k,
            _ => return self.mint(),
        };

        if let Some(existing) = self.resolved.get(key) {
            return existing.clone();
        }

        let id = match self.preferred.remove(key) {
            Some(preferred) => preferred,
            None => self.mint(),
        };
        self.resolved.insert(key.to_string(), id.clone());
        id
    }

    /// Look up a key resolved earlier in this pass without minting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.resolved.get(key).map(String::as_str)
    }

    /// Check whether a key was resolved in this pass
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.resolved.contains_key(key)
    }

    /// Number of remembered keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Whether no key has been remembered yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Iterate over `(key, identifier)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.resolved.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `(identifier, key)` pairs of this cache.
    ///
    /// After an import this maps internal ids back to the original product
    /// IDs, which is the seed a later export uses via [`preferring`](Self::preferring).
    #[must_use]
    pub fn inverse(&self) -> IndexMap<String, String> {
        self.resolved
            .iter()
            .map(|(k, v)| (v.clone(), k.clone()))
            .collect()
    }

    fn mint(&self) -> String {
        format!("{}{}", self.prefix, Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_resolves_to_same_id() {
        let mut cache = IdCache::new();
        let a = cache.resolve(Some("CSAFPID-1"));
        let b = cache.resolve(Some("CSAFPID-1"));
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_or_empty_key_is_always_fresh() {
        let mut cache = IdCache::new();
        let a = cache.resolve(None);
        let b = cache.resolve(None);
        let c = cache.resolve(Some(""));
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(cache.is_empty(), "anonymous resolutions must not be cached");
    }

    #[test]
    fn prefix_is_applied_to_minted_ids() {
        let mut cache = IdCache::with_prefix("CSAFPID-");
        assert!(cache.resolve(Some("branch-1")).starts_with("CSAFPID-"));
    }

    #[test]
    fn distinct_instances_do_not_share_ids() {
        let mut first = IdCache::new();
        let mut second = IdCache::new();
        assert_ne!(first.resolve(Some("k")), second.resolve(Some("k")));
    }

    #[test]
    fn get_does_not_mint() {
        let mut cache = IdCache::new();
        assert_eq!(cache.get("k"), None);
        let id = cache.resolve(Some("k"));
        assert_eq!(cache.get("k"), Some(id.as_str()));
        assert!(cache.contains("k"));
    }

    #[test]
    fn preferred_ids_are_adopted_lazily() {
        let mut cache = IdCache::preferring("CSAFPID-", [("internal-1", "CSAFPID-1")]);
        assert_eq!(cache.get("internal-1"), None);
        assert_eq!(cache.resolve(Some("internal-1")), "CSAFPID-1");
        assert_eq!(cache.get("internal-1"), Some("CSAFPID-1"));
        assert!(cache.resolve(Some("internal-2")).starts_with("CSAFPID-"));
    }

    #[test]
    fn inverse_swaps_pairs() {
        let mut cache = IdCache::new();
        let id = cache.resolve(Some("CSAFPID-1"));
        let inverse = cache.inverse();
        assert_eq!(inverse.get(&id).map(String::as_str), Some("CSAFPID-1"));
    }
}
