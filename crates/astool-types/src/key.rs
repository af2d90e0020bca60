use std::fmt;

use crate::digest::KeyDigest;
use crate::error::{TypeError, TypeResult};
use crate::namespace::NamespaceSet;
use crate::value::Value;

/// Address of one record: namespace, set, optional user key and digest.
///
/// Keys built locally always carry their user key. Keys handed back by a
/// scan may only carry the digest, because the store does not have to retain
/// the original key.
#[derive(Clone, PartialEq)]
pub struct Key {
    namespace: String,
    set: String,
    user_key: Option<Value>,
    digest: KeyDigest,
}

impl Key {
    /// Build a key from a user key value, computing its digest.
    pub fn new(ns: &NamespaceSet, user_key: impl Into<Value>) -> TypeResult<Self> {
        let user_key = user_key.into();
        let (particle, bytes) = user_key
            .key_particle()
            .ok_or(TypeError::UnsupportedKey(user_key.type_name()))?;
        Ok(Self {
            namespace: ns.namespace().to_string(),
            set: ns.set().to_string(),
            digest: KeyDigest::compute(ns.set(), particle, &bytes),
            user_key: Some(user_key),
        })
    }

    /// Reassemble a key from parts reported by a store.
    pub fn from_parts(
        namespace: impl Into<String>,
        set: impl Into<String>,
        user_key: Option<Value>,
        digest: KeyDigest,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            set: set.into(),
            user_key,
            digest,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set(&self) -> &str {
        &self.set
    }

    pub fn user_key(&self) -> Option<&Value> {
        self.user_key.as_ref()
    }

    pub fn digest(&self) -> &KeyDigest {
        &self.digest
    }

    /// Drop the user key, leaving a digest-only key.
    pub fn without_user_key(mut self) -> Self {
        self.user_key = None;
        self
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("namespace", &self.namespace)
            .field("set", &self.set)
            .field("user_key", &self.user_key)
            .field("digest", &self.digest)
            .finish()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user_key {
            Some(v) => write!(f, "{}:{}:{}", self.namespace, self.set, v),
            None => write!(f, "{}:{}:{}", self.namespace, self.set, self.digest),
        }
    }
}
