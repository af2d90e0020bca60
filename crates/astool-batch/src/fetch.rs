use astool_store::RecordStore;
use astool_types::{Key, NamespaceSet, Record};

use crate::console::Console;
use crate::error::{BatchResult, KeyError};
use crate::processor::{process, KeyOperation};
use crate::report::BatchReport;
use crate::source::KeySource;

/// Get each key as-is and print the record.
pub struct Fetch<'s> {
    store: &'s dyn RecordStore,
}

impl<'s> Fetch<'s> {
    pub fn new(store: &'s dyn RecordStore) -> Self {
        Self { store }
    }
}

impl KeyOperation for Fetch<'_> {
    fn verb(&self) -> &'static str {
        "get"
    }

    fn resolve_key(&self, ns: &NamespaceSet, raw: &str) -> Result<Key, KeyError> {
        Ok(Key::new(ns, raw)?)
    }

    fn perform(&self, key: &Key) -> Result<Option<Record>, KeyError> {
        Ok(Some(self.store.get(key)?))
    }
}

/// Fetch every key of `source`; any failed key makes the batch an error.
pub fn fetch_keys(
    store: &dyn RecordStore,
    ns: &NamespaceSet,
    source: KeySource<'_>,
    console: &mut Console<'_>,
) -> BatchResult<BatchReport> {
    process(&Fetch::new(store), ns, source, console)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BatchError;
    use astool_store::InMemoryRecordStore;
    use astool_types::Value;
    use serde_json::{json, Value as JsonValue};
    use std::io::Cursor;

    fn ns() -> NamespaceSet {
        NamespaceSet::new("test", "page")
    }

    fn seeded() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        for (k, v) in [("k1", 1i64), ("k3", 3)] {
            store.put(&Key::new(&ns(), k).unwrap(), vec![("v", Value::Int(v))], 30);
        }
        store
    }

    fn run(store: &dyn RecordStore, source: KeySource<'_>) -> (BatchResult<BatchReport>, String, String) {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let result = {
            let mut console = Console::new(&mut out, &mut diag);
            fetch_keys(store, &ns(), source, &mut console)
        };
        (result, String::from_utf8(out).unwrap(), String::from_utf8(diag).unwrap())
    }

    #[test]
    fn file_with_missing_key() {
        let store = seeded();
        let (result, out, diag) = run(&store, KeySource::from_reader(Cursor::new("k1\nk2\nk3")));

        assert!(matches!(result, Err(BatchError::Failures(1))));

        let lines: Vec<JsonValue> = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(
            lines,
            vec![
                json!({"key": "k1", "ttl": 30, "gen": 1, "bins": {"v": 1}}),
                json!({"key": "k3", "ttl": 30, "gen": 1, "bins": {"v": 3}}),
            ]
        );

        let diag: Vec<&str> = diag.lines().collect();
        assert_eq!(diag.len(), 2);
        assert!(diag[0].starts_with("fail to get k2: key not found"), "{}", diag[0]);
        assert_eq!(diag[1], "success=2 failure=1");
    }

    #[test]
    fn args_all_present() {
        let store = seeded();
        let (result, out, diag) = run(&store, KeySource::from_args(["k3", "k1"]));
        let report = result.unwrap();
        assert_eq!(report.successes, vec!["k3", "k1"]);
        assert_eq!(out.lines().count(), 2);
        assert_eq!(diag, "success=2 failure=0\n");
    }

    #[test]
    fn store_error_is_a_key_failure() {
        let store = seeded();
        store.fail_key(&Key::new(&ns(), "k1").unwrap(), "connection reset");
        let (result, out, diag) = run(&store, KeySource::from_args(["k1", "k3"]));
        assert!(matches!(result, Err(BatchError::Failures(1))));
        assert_eq!(out.lines().count(), 1);
        assert!(diag.starts_with("fail to get k1: connection reset\n"));
    }

    #[test]
    fn empty_file_is_success() {
        let store = seeded();
        let (result, out, diag) = run(&store, KeySource::from_reader(Cursor::new("")));
        assert_eq!(result.unwrap().total(), 0);
        assert!(out.is_empty());
        assert_eq!(diag, "success=0 failure=0\n");
    }

    #[test]
    fn nested_bins_are_stringified() {
        let store = InMemoryRecordStore::new();
        let nested = Value::Map(vec![(
            Value::Int(1),
            Value::Map(vec![(Value::Int(2), Value::Map(vec![(Value::Int(3), Value::from("deep"))]))]),
        )]);
        store.put(&Key::new(&ns(), "n").unwrap(), vec![("m", nested)], 0);

        let (result, out, _) = run(&store, KeySource::from_args(["n"]));
        assert!(result.is_ok());
        let line: JsonValue = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(line["bins"]["m"], json!({"1": {"2": {"3": "deep"}}}));
    }
}
