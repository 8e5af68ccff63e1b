//! Value types for Inlay properties.
//!
//! Values are the typed data a deserializer produces from raw payload
//! properties and a store keeps on live resources. Scalars cover the
//! primitive kinds a key may use; `Complex` carries structured properties.

use indexmap::IndexMap;
use std::fmt;

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer (Int32 and Int64 properties).
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Decimal kept in its textual form to avoid rounding.
    Decimal(String),
    /// UTF-8 string.
    String(String),
    /// GUID in its canonical hyphenated form.
    Guid(String),
    /// Date-time in ISO 8601 form, without offset.
    DateTime(String),
    /// Structured (complex) value.
    Complex(PropertyBag),
}

impl Value {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert to a raw wire value (used when echoing keys into payloads).
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Decimal(s) | Value::String(s) | Value::Guid(s) | Value::DateTime(s) => {
                Json::String(s.clone())
            }
            Value::Complex(bag) => Json::Object(
                bag.iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Convert a raw wire value without a declared kind, inferring the
    /// variant from its JSON shape. Arrays have no typed counterpart.
    pub fn from_json_untyped(raw: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;
        match raw {
            Json::Null => Some(Value::Null),
            Json::Bool(b) => Some(Value::Bool(*b)),
            Json::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float)),
            Json::String(s) => Some(Value::String(s.clone())),
            Json::Object(map) => {
                let mut bag = PropertyBag::new();
                for (name, value) in map {
                    bag.insert(name.clone(), Value::from_json_untyped(value)?);
                }
                Some(Value::Complex(bag))
            }
            Json::Array(_) => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::Guid(_) => "Guid",
            Value::DateTime(_) => "DateTime",
            Value::Complex(_) => "Complex",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Guid(g) => write!(f, "guid:{}", g),
            Value::DateTime(dt) => write!(f, "datetime:{}", dt),
            Value::Complex(bag) => {
                write!(f, "{{")?;
                for (i, (name, value)) in bag.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Ordered property storage: name to typed value, in payload order.
pub type PropertyBag = IndexMap<String, Value>;

/// Helper macro to create property bags.
#[macro_export]
macro_rules! props {
    () => {
        $crate::PropertyBag::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut bag = $crate::PropertyBag::new();
            $(
                bag.insert($key.to_string(), $crate::Value::from($value));
            )+
            bag
        }
    };
}
