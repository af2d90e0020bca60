use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use astool_types::{Key, KeyDigest, NamespaceSet, Record, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::policy::ScanPolicy;
use crate::traits::{RecordCursor, RecordStore};

type Slot = (String, KeyDigest);

#[derive(Clone, Debug)]
struct StoredRecord {
    seq: u64,
    key: Key,
    generation: u32,
    expiration: u32,
    bins: BTreeMap<String, Value>,
}

impl StoredRecord {
    fn to_record(&self) -> Record {
        Record {
            key: Some(self.key.clone()),
            generation: self.generation,
            expiration: self.expiration,
            bins: self.bins.clone(),
        }
    }
}

/// In-memory, HashMap-based record store.
///
/// Intended for tests and embedding. Records are addressed by namespace and
/// digest, like a real cluster. Faults can be injected per key and per scan
/// position to exercise the failure paths of callers.
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<Slot, StoredRecord>>,
    key_faults: RwLock<HashMap<Slot, String>>,
    scan_faults: RwLock<BTreeMap<usize, String>>,
    scan_open_fault: RwLock<Option<String>>,
    last_scan: RwLock<Option<ScanPolicy>>,
    next_seq: AtomicU64,
}

impl InMemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            key_faults: RwLock::new(HashMap::new()),
            scan_faults: RwLock::new(BTreeMap::new()),
            scan_open_fault: RwLock::new(None),
            last_scan: RwLock::new(None),
            next_seq: AtomicU64::new(0),
        }
    }

    fn slot(key: &Key) -> Slot {
        (key.namespace().to_string(), *key.digest())
    }

    /// Write a record, replacing its bins and bumping its generation.
    ///
    /// Returns the new generation.
    pub fn put<I, S>(&self, key: &Key, bins: I, ttl: u32) -> u32
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let bins: BTreeMap<String, Value> = bins.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let mut map = self.records.write().expect("lock poisoned");
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let entry = map.entry(Self::slot(key)).or_insert_with(|| StoredRecord {
            seq,
            key: key.clone(),
            generation: 0,
            expiration: ttl,
            bins: BTreeMap::new(),
        });
        entry.generation += 1;
        entry.expiration = ttl;
        entry.bins = bins;
        entry.generation
    }

    /// Write a record whose user key is not retained, as with a write that
    /// did not send the key. Scans only see its digest.
    pub fn put_digest_only<I, S>(&self, key: &Key, bins: I, ttl: u32) -> u32
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let generation = self.put(key, bins, ttl);
        let mut map = self.records.write().expect("lock poisoned");
        if let Some(entry) = map.get_mut(&Self::slot(key)) {
            entry.key = entry.key.clone().without_user_key();
        }
        generation
    }

    /// Make every `get`/`delete` of `key` fail with a backend error.
    pub fn fail_key(&self, key: &Key, message: impl Into<String>) {
        self.key_faults
            .write()
            .expect("lock poisoned")
            .insert(Self::slot(key), message.into());
    }

    /// Make scans yield a per-record error before the record at `position`.
    ///
    /// A position at or past the end appends the error after the last record.
    pub fn fail_scan_at(&self, position: usize, message: impl Into<String>) {
        self.scan_faults
            .write()
            .expect("lock poisoned")
            .insert(position, message.into());
    }

    /// Make every scan fail before a cursor is returned.
    pub fn fail_scan_open(&self, message: impl Into<String>) {
        *self.scan_open_fault.write().expect("lock poisoned") = Some(message.into());
    }

    /// Whether a record exists for `key`.
    pub fn contains(&self, key: &Key) -> bool {
        self.records
            .read()
            .expect("lock poisoned")
            .contains_key(&Self::slot(key))
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Policy of the most recent scan, if any.
    pub fn last_scan_policy(&self) -> Option<ScanPolicy> {
        self.last_scan.read().expect("lock poisoned").clone()
    }

    fn check_fault(&self, key: &Key) -> StoreResult<()> {
        match self.key_faults.read().expect("lock poisoned").get(&Self::slot(key)) {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, key: &Key) -> StoreResult<Record> {
        self.check_fault(key)?;
        let map = self.records.read().expect("lock poisoned");
        map.get(&Self::slot(key))
            .map(StoredRecord::to_record)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn delete(&self, key: &Key) -> StoreResult<bool> {
        self.check_fault(key)?;
        let mut map = self.records.write().expect("lock poisoned");
        Ok(map.remove(&Self::slot(key)).is_some())
    }

    fn scan(&self, ns: &NamespaceSet, policy: &ScanPolicy) -> StoreResult<RecordCursor<'_>> {
        if let Some(message) = self.scan_open_fault.read().expect("lock poisoned").as_ref() {
            return Err(StoreError::Backend(message.clone()));
        }
        *self.last_scan.write().expect("lock poisoned") = Some(policy.clone());

        let map = self.records.read().expect("lock poisoned");
        let mut matching: Vec<&StoredRecord> = map
            .values()
            .filter(|r| r.key.namespace() == ns.namespace() && r.key.set() == ns.set())
            .collect();
        matching.sort_by_key(|r| r.seq);

        let mut items: Vec<StoreResult<Record>> =
            matching.into_iter().map(|r| Ok(r.to_record())).collect();

        // Insert from the back so earlier positions stay valid.
        let faults = self.scan_faults.read().expect("lock poisoned");
        for (&position, message) in faults.iter().rev() {
            let at = position.min(items.len());
            items.insert(at, Err(StoreError::Backend(message.clone())));
        }

        debug!(namespace = ns.namespace(), set = ns.set(), items = items.len(), "memory scan");
        Ok(Box::new(items.into_iter()))
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.len())
            .finish()
    }
}
