use std::collections::BTreeMap;

use astool_types::{Key, Record, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use serde_json::{Map, Number, Value as JsonValue};

/// One rendered record: `{"key":..,"ttl":..,"gen":..,"bins":{..}}`.
#[derive(Debug, Serialize)]
pub struct RecordLine<'a> {
    pub key: &'a str,
    pub ttl: u32,
    pub gen: u32,
    pub bins: Map<String, JsonValue>,
}

impl<'a> RecordLine<'a> {
    pub fn new(key: &'a str, record: &Record) -> Self {
        Self {
            key,
            ttl: record.expiration,
            gen: record.generation,
            bins: normalize_bins(&record.bins),
        }
    }
}

pub fn normalize_bins(bins: &BTreeMap<String, Value>) -> Map<String, JsonValue> {
    bins.iter()
        .map(|(name, v)| (name.clone(), normalize_value(v)))
        .collect()
}

/// Convert a bin value to JSON.
///
/// Maps become objects keyed by the string form of their keys, at every
/// depth. Byte values become base64 strings. Non-finite floats become `null`.
pub fn normalize_value(v: &Value) -> JsonValue {
    match v {
        Value::Nil => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::from(*i),
        Value::UInt(u) => JsonValue::from(*u),
        Value::Float(x) => Number::from_f64(*x).map_or(JsonValue::Null, JsonValue::Number),
        Value::String(s) | Value::GeoJson(s) => JsonValue::String(s.clone()),
        Value::Blob(b) => JsonValue::String(STANDARD.encode(b)),
        Value::List(items) => JsonValue::Array(items.iter().map(normalize_value).collect()),
        Value::Map(entries) => JsonValue::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), normalize_value(v)))
                .collect(),
        ),
    }
}

/// Identifier printed for a scanned record.
///
/// The user key's string form when the store kept it, otherwise
/// `digest:<base64>`.
pub fn scanned_key(key: Option<&Key>) -> String {
    match key {
        Some(k) => match k.user_key() {
            Some(v) => v.to_string(),
            None => format!("digest:{}", STANDARD.encode(k.digest().as_bytes())),
        },
        None => String::new(),
    }
}
