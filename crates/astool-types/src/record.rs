use std::collections::BTreeMap;

use crate::key::Key;
use crate::value::Value;

/// One record as returned by a store read or scan.
///
/// Transient: read once per operation, never cached or mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Present for scanned records; may be digest-only.
    pub key: Option<Key>,
    /// Per-record revision counter, bumped on every write.
    pub generation: u32,
    /// Time to live in seconds as reported by the store.
    pub expiration: u32,
    pub bins: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(generation: u32, expiration: u32) -> Self {
        Self {
            key: None,
            generation,
            expiration,
            bins: BTreeMap::new(),
        }
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_bin(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bins.insert(name.into(), value.into());
        self
    }

    pub fn bin(&self, name: &str) -> Option<&Value> {
        self.bins.get(name)
    }
}
