//! Environment stores the parser reads from and writes into.
//!
//! Responsibilities:
//! - Define the `EnvSink` abstraction over a string-to-string store.
//! - Provide `ProcessEnv` (the real process environment) and `MapSink`
//!   (an isolated in-memory store) implementations.
//!
//! Does NOT handle:
//! - Parsing of `.env` files (see `parser`).
//! - Typed access to stored values (see `getter`).
//!
//! Invariants / Assumptions:
//! - Keys are case-sensitive; insertion order is irrelevant.
//! - No two parse runs mutate the same sink concurrently; callers
//!   serialize access themselves.

use std::collections::HashMap;

/// A mutable string-to-string store.
///
/// Substitution reads the current state through [`EnvSink::get`]; the parse
/// driver writes each resolved value through [`EnvSink::set`], in file order.
/// Tests and embedders pass a [`MapSink`] to avoid touching process-global
/// state; production callers typically use [`ProcessEnv`].
pub trait EnvSink {
    /// Look up the current value for `key`, or `None` if unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Assign `value` to `key`, overwriting any earlier assignment.
    fn set(&mut self, key: &str, value: &str);
}

/// The real process environment.
///
/// Parse runs against `ProcessEnv` must be serialized by the caller: the
/// process environment is global and this type does no locking of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSink for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-unicode values are treated as unset.
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: callers serialize parse runs against the process
        // environment (see trait docs); no other thread may be reading or
        // writing it during a run.
        unsafe { std::env::set_var(key, value) }
    }
}

/// An isolated in-memory store backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MapSink {
    values: HashMap<String, String>,
}

impl MapSink {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a key, returning its previous value if any.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over stored key/value pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl EnvSink for MapSink {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSink {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
