//! Count tables and vocabulary shared by every model.

use ahash::{AHashMap, AHashSet};
use std::borrow::Borrow;
use std::hash::Hash;

use crate::token::Token;

/// A frozen-after-training mapping from n-gram keys to occurrence counts.
///
/// Looking up a key that was never counted returns 0 and leaves the table
/// untouched; only the owning model can add counts.
#[derive(Debug, Clone)]
pub struct CountTable<K> {
    counts: AHashMap<K, u64>,
}

impl<K: Eq + Hash> CountTable<K> {
    pub fn new() -> Self {
        Self {
            counts: AHashMap::new(),
        }
    }

    /// Count for `key`, 0 if it was never seen.
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.contains_key(key)
    }

    /// Add one occurrence and return the new count.
    pub(crate) fn increment(&mut self, key: K) -> u64 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Overwrite the count for `key`.
    pub(crate) fn set(&mut self, key: K, count: u64) {
        self.counts.insert(key, count);
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(key, &count)| (key, count))
    }
}

impl<K: Eq + Hash> Default for CountTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// The distinct tokens observed during training. Its size is `V` in every
/// add-one denominator.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    tokens: AHashSet<Token>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the token was not already present.
    pub(crate) fn insert(&mut self, token: &Token) -> bool {
        if self.tokens.contains(token) {
            return false;
        }
        self.tokens.insert(token.clone())
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
