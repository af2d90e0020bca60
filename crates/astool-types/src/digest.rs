use std::fmt;

use serde::{Deserialize, Serialize};

/// Length in bytes of a record digest.
pub const DIGEST_LEN: usize = 20;

const DOMAIN: &str = "astool-key-v1";

/// Fixed-length digest a store addresses a record by.
///
/// Computed locally as a domain-separated BLAKE3 hash of the set name and the
/// encoded user key, truncated to [`DIGEST_LEN`] bytes. Backends with their own
/// digest scheme hand back their digest through [`KeyDigest::from_array`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyDigest([u8; DIGEST_LEN]);

impl KeyDigest {
    /// Compute the digest for a user key within a set.
    ///
    /// `particle` tags the key type so that `"1"` and `1` never collide.
    pub fn compute(set: &str, particle: u8, key_bytes: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(DOMAIN.as_bytes());
        hasher.update(b":");
        hasher.update(set.as_bytes());
        hasher.update(&[particle]);
        hasher.update(key_bytes);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&hasher.finalize().as_bytes()[..DIGEST_LEN]);
        Self(out)
    }

    pub const fn from_array(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for KeyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyDigest({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for KeyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
