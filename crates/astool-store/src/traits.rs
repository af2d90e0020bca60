use std::sync::Arc;

use astool_types::{Key, NamespaceSet, Record};

use crate::error::StoreResult;
use crate::policy::ScanPolicy;

/// Blocking sequence of scanned records.
///
/// An `Err` item is a per-record error reported by the cursor; the cursor
/// keeps yielding after it. The sequence ends when the store closes it.
pub type RecordCursor<'a> = Box<dyn Iterator<Item = StoreResult<Record>> + 'a>;

/// Single-key access to a namespace/set keyed store.
///
/// Every call is one round trip. Callers issue calls strictly one after
/// another; implementations need not pipeline anything.
pub trait RecordStore: Send + Sync {
    /// Read every bin of a record.
    ///
    /// Returns `Err(StoreError::NotFound)` if the record does not exist.
    fn get(&self, key: &Key) -> StoreResult<Record>;

    /// Delete a record. Returns `true` if the record existed.
    fn delete(&self, key: &Key) -> StoreResult<bool>;

    /// Open a cursor over every record of a namespace/set.
    ///
    /// An error here means the scan could not be started at all.
    fn scan(&self, ns: &NamespaceSet, policy: &ScanPolicy) -> StoreResult<RecordCursor<'_>>;
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn get(&self, key: &Key) -> StoreResult<Record> {
        (**self).get(key)
    }

    fn delete(&self, key: &Key) -> StoreResult<bool> {
        (**self).delete(key)
    }

    fn scan(&self, ns: &NamespaceSet, policy: &ScanPolicy) -> StoreResult<RecordCursor<'_>> {
        (**self).scan(ns, policy)
    }
}
