use std::sync::Arc;
use std::time::Duration;

use ::aerospike::{
    Bins, Client, ClientPolicy, ErrorKind, FloatValue, Host, ReadPolicy, Recordset, ResultCode,
    WritePolicy,
};
use astool_types::{Key, KeyDigest, NamespaceSet, Record, TypeError, Value};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{StoreError, StoreResult};
use crate::policy::{Priority, ScanPolicy};
use crate::traits::{RecordCursor, RecordStore};

/// Record store backed by a blocking Aerospike cluster client.
pub struct AerospikeStore {
    client: Client,
    read_policy: ReadPolicy,
    write_policy: WritePolicy,
}

impl AerospikeStore {
    /// Connect to the cluster through a single seed node.
    pub fn connect(config: &ClientConfig) -> StoreResult<Self> {
        config.validate()?;

        let mut policy = ClientPolicy::default();
        policy.timeout = Some(Duration::from_millis(config.timeout_ms));

        let hosts = vec![Host::new(&config.host, config.port)];
        let client =
            Client::new(&policy, &hosts).map_err(|e| StoreError::Connection(e.to_string()))?;
        info!(address = %config.address(), "connected to aerospike");

        Ok(Self {
            client,
            read_policy: ReadPolicy::default(),
            write_policy: WritePolicy::default(),
        })
    }
}

impl RecordStore for AerospikeStore {
    fn get(&self, key: &Key) -> StoreResult<Record> {
        let as_key = to_client_key(key)?;
        let rec = self
            .client
            .get(&self.read_policy, &as_key, Bins::All)
            .map_err(|e| map_error(e, key))?;
        Ok(from_client_record(rec))
    }

    fn delete(&self, key: &Key) -> StoreResult<bool> {
        let as_key = to_client_key(key)?;
        match self.client.delete(&self.write_policy, &as_key) {
            Ok(existed) => Ok(existed),
            Err(e) => match map_error(e, key) {
                StoreError::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    fn scan(&self, ns: &NamespaceSet, policy: &ScanPolicy) -> StoreResult<RecordCursor<'_>> {
        let mut as_policy = ::aerospike::ScanPolicy::default();
        as_policy.base_policy.priority = match policy.priority {
            Priority::Default => ::aerospike::Priority::Default,
            Priority::Low => ::aerospike::Priority::Low,
            Priority::Medium => ::aerospike::Priority::Medium,
            Priority::High => ::aerospike::Priority::High,
        };
        as_policy.max_concurrent_nodes = policy.max_concurrent_nodes;
        as_policy.record_queue_size = policy.record_queue_size;

        debug!(namespace = ns.namespace(), set = ns.set(), ?policy, "starting scan");
        let records = self
            .client
            .scan(&as_policy, ns.namespace(), ns.set(), Bins::All)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Box::new(RecordsetCursor { records }))
    }
}

/// Owning adapter over the client's shared recordset.
struct RecordsetCursor {
    records: Arc<Recordset>,
}

impl Iterator for RecordsetCursor {
    type Item = StoreResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut records: &Recordset = &self.records;
        records.next().map(|item| {
            item.map(from_client_record)
                .map_err(|e| StoreError::Backend(e.to_string()))
        })
    }
}

fn map_error(err: ::aerospike::Error, key: &Key) -> StoreError {
    match err.kind() {
        ErrorKind::ServerError(ResultCode::KeyNotFoundError) => StoreError::NotFound(key.to_string()),
        ErrorKind::Connection(_) => StoreError::Connection(err.to_string()),
        _ => StoreError::Backend(err.to_string()),
    }
}

fn to_client_key(key: &Key) -> StoreResult<::aerospike::Key> {
    let user_key = key
        .user_key()
        .ok_or(StoreError::InvalidKey(TypeError::UnsupportedKey("digest-only")))?;
    let value = match user_key {
        Value::String(s) => ::aerospike::Value::String(s.clone()),
        Value::Int(i) => ::aerospike::Value::Int(*i),
        Value::Blob(b) => ::aerospike::Value::Blob(b.clone()),
        other => return Err(StoreError::InvalidKey(TypeError::UnsupportedKey(other.type_name()))),
    };
    ::aerospike::Key::new(key.namespace(), key.set(), value)
        .map_err(|e| StoreError::Backend(e.to_string()))
}

fn from_client_key(key: &::aerospike::Key) -> Key {
    Key::from_parts(
        key.namespace.clone(),
        key.set_name.clone(),
        key.user_key.as_ref().map(from_client_value),
        KeyDigest::from_array(key.digest),
    )
}

fn from_client_record(rec: ::aerospike::Record) -> Record {
    let expiration = ttl_secs(rec.time_to_live());
    Record {
        key: rec.key.as_ref().map(from_client_key),
        generation: rec.generation,
        expiration,
        bins: rec
            .bins
            .iter()
            .map(|(name, v)| (name.clone(), from_client_value(v)))
            .collect(),
    }
}

/// Seconds left to live. A record that never expires reports `u32::MAX`.
fn ttl_secs(ttl: Option<Duration>) -> u32 {
    match ttl {
        Some(ttl) => u32::try_from(ttl.as_secs()).unwrap_or(u32::MAX),
        None => u32::MAX,
    }
}

fn from_client_value(v: &::aerospike::Value) -> Value {
    use ::aerospike::Value as V;
    match v {
        V::Nil => Value::Nil,
        V::Bool(b) => Value::Bool(*b),
        V::Int(i) => Value::Int(*i),
        V::UInt(u) => Value::UInt(*u),
        V::Float(f) => Value::Float(match f {
            FloatValue::F32(bits) => f64::from(f32::from_bits(*bits)),
            FloatValue::F64(bits) => f64::from_bits(*bits),
        }),
        V::String(s) => Value::String(s.clone()),
        V::Blob(b) => Value::Blob(b.clone()),
        V::List(items) => Value::List(items.iter().map(from_client_value).collect()),
        V::HashMap(m) => Value::Map(
            m.iter()
                .map(|(k, v)| (from_client_value(k), from_client_value(v)))
                .collect(),
        ),
        V::OrderedMap(pairs) => Value::Map(
            pairs
                .iter()
                .map(|(k, v)| (from_client_value(k), from_client_value(v)))
                .collect(),
        ),
        V::GeoJSON(s) => Value::GeoJson(s.clone()),
        V::HLL(b) => Value::Blob(b.clone()),
    }
}
