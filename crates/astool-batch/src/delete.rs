use astool_store::RecordStore;
use astool_types::{Key, NamespaceSet, Record};
use tracing::debug;

use crate::console::Console;
use crate::error::{BatchResult, KeyError};
use crate::normalize::normalize_raw;
use crate::processor::{process, KeyOperation};
use crate::report::BatchReport;
use crate::source::KeySource;

/// Delete the record keyed by each URL's normalized form.
///
/// Deleting a record that does not exist counts as success.
pub struct Delete<'s> {
    store: &'s dyn RecordStore,
}

impl<'s> Delete<'s> {
    pub fn new(store: &'s dyn RecordStore) -> Self {
        Self { store }
    }
}

impl KeyOperation for Delete<'_> {
    fn verb(&self) -> &'static str {
        "delete"
    }

    fn resolve_key(&self, ns: &NamespaceSet, raw: &str) -> Result<Key, KeyError> {
        let normalized = normalize_raw(raw)?;
        Ok(Key::new(ns, normalized)?)
    }

    fn perform(&self, key: &Key) -> Result<Option<Record>, KeyError> {
        let existed = self.store.delete(key)?;
        debug!(%key, existed, "deleted");
        Ok(None)
    }

    fn describe_failure(&self, raw: &str, err: &KeyError) -> String {
        format!("{err} url={raw}")
    }
}

/// Delete every key of `source`; any failed key makes the batch an error.
pub fn delete_keys(
    store: &dyn RecordStore,
    ns: &NamespaceSet,
    source: KeySource<'_>,
    console: &mut Console<'_>,
) -> BatchResult<BatchReport> {
    process(&Delete::new(store), ns, source, console)?.into_result()
}

/// Delete a single key. No tally and no summary line: the key's own error is
/// returned as-is.
pub fn delete_one(store: &dyn RecordStore, ns: &NamespaceSet, raw: &str) -> Result<(), KeyError> {
    let op = Delete::new(store);
    let key = op.resolve_key(ns, raw)?;
    op.perform(&key).map(|_| ())
}
