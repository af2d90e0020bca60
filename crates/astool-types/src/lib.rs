//! Foundation types for astool.
//!
//! Every other astool crate depends on `astool-types`. Nothing in here talks
//! to a store; these are the shapes the store hands back and the shapes the
//! batch pipeline addresses records with.
//!
//! # Key Types
//!
//! - [`NamespaceSet`] — `namespace.set` container reference
//! - [`Key`] — user key plus the digest the store addresses it by
//! - [`KeyDigest`] — fixed-length record digest
//! - [`Value`] — tagged union of every bin value shape
//! - [`Record`] — generation, expiration and bins of one stored record

pub mod digest;
pub mod error;
pub mod key;
pub mod namespace;
pub mod record;
pub mod value;

pub use digest::KeyDigest;
pub use error::{TypeError, TypeResult};
pub use key::Key;
pub use namespace::NamespaceSet;
pub use record::Record;
pub use value::Value;
