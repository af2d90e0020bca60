use std::fmt;

/// A bin value (or user key) as held by the store.
///
/// Values are assumed acyclic; every traversal over them recurses without a
/// depth limit.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Blob(Vec<u8>),
    List(Vec<Value>),
    /// Ordered key/value pairs. Keys may be any value, not only strings.
    Map(Vec<(Value, Value)>),
    GeoJson(String),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Blob(_) => "blob",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::GeoJson(_) => "geojson",
        }
    }

    /// Particle tag and encoded bytes of a value usable as a user key.
    ///
    /// Only strings, integers and blobs can key a record.
    pub fn key_particle(&self) -> Option<(u8, Vec<u8>)> {
        match self {
            Value::Int(i) => Some((1, i.to_be_bytes().to_vec())),
            Value::String(s) => Some((3, s.as_bytes().to_vec())),
            Value::Blob(b) => Some((4, b.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) | Value::GeoJson(s) => f.write_str(s),
            Value::Blob(b) => f.write_str(&String::from_utf8_lossy(b)),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::UInt(u)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Blob(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(-7i64).to_string(), "-7");
        assert_eq!(Value::from(7u64).to_string(), "7");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(b"raw".to_vec()).to_string(), "raw");
    }

    #[test]
    fn nested_display() {
        let v = Value::Map(vec![(
            Value::Int(1),
            Value::List(vec![Value::from("a"), Value::Int(2)]),
        )]);
        assert_eq!(v.to_string(), "{1: [a, 2]}");
    }

    #[test]
    fn key_particles() {
        assert_eq!(Value::Int(1).key_particle().unwrap().0, 1);
        assert_eq!(Value::from("k").key_particle().unwrap(), (3, b"k".to_vec()));
        assert_eq!(Value::from(vec![9u8]).key_particle().unwrap().0, 4);
        assert!(Value::Float(1.0).key_particle().is_none());
        assert!(Value::List(vec![]).key_particle().is_none());
    }
}
