use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// A `namespace.set` reference.
///
/// Parsed from a single configuration string that must split on `.` into
/// exactly two non-empty components.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceSet {
    namespace: String,
    set: String,
}

impl NamespaceSet {
    pub fn new(namespace: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            set: set.into(),
        }
    }

    /// Parse a `namespace.set` string.
    pub fn parse(src: &str) -> TypeResult<Self> {
        let mut parts = src.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(ns), Some(set), None) if !ns.is_empty() && !set.is_empty() => {
                Ok(Self::new(ns, set))
            }
            _ => Err(TypeError::InvalidNamespaceSet(src.to_string())),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set(&self) -> &str {
        &self.set
    }
}

impl FromStr for NamespaceSet {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NamespaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.set)
    }
}
