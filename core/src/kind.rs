//! Primitive kinds and their canonical literal forms.
//!
//! Every key property is declared with a primitive kind. The kind owns the
//! conversions a key needs: typed value to canonical literal text, literal
//! text back to a typed value, and raw wire value to typed value.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::Value;

/// Primitive kinds a property may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Boolean,
    Int32,
    Int64,
    Double,
    Decimal,
    String,
    Guid,
    DateTime,
}

fn guid_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
                .ok()
        })
        .as_ref()
}

fn datetime_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2}(\.\d{1,7})?)?$").ok()
        })
        .as_ref()
}

fn decimal_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").ok())
        .as_ref()
}

/// Canonical decimal text: no sign for zero or positives, no redundant
/// leading or trailing zeros. Expects text already matching `decimal_pattern`.
fn normalize_decimal(text: &str) -> String {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len());
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn decimal_value(text: &str) -> Option<Value> {
    matches(decimal_pattern(), text).then(|| Value::Decimal(normalize_decimal(text)))
}

fn matches(pattern: Option<&Regex>, text: &str) -> bool {
    pattern.map(|re| re.is_match(text)).unwrap_or(false)
}

/// Strip a single-character type suffix in either case.
fn strip_suffix_ci(text: &str, suffix: char) -> &str {
    text.strip_suffix(suffix)
        .or_else(|| text.strip_suffix(suffix.to_ascii_lowercase()))
        .unwrap_or(text)
}

/// Unwrap `prefix'body'`, case-insensitive on the prefix. An empty prefix
/// unwraps a plain quoted string and un-doubles embedded quotes.
fn unquote(text: &str, prefix: &str) -> Option<String> {
    if text.len() < prefix.len() + 2 || !text.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, rest) = text.split_at(prefix.len());
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let body = rest.strip_prefix('\'')?.strip_suffix('\'')?;

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            // A lone quote inside the body is not a valid literal.
            if chars.next() != Some('\'') {
                return None;
            }
        }
        out.push(c);
    }
    Some(out)
}

impl PrimitiveKind {
    /// Canonical literal text for a value of this kind.
    ///
    /// Returns `None` for null or for a value of the wrong shape.
    pub fn to_literal(&self, value: &Value) -> Option<String> {
        match (self, value) {
            (PrimitiveKind::Boolean, Value::Bool(b)) => Some(b.to_string()),
            (PrimitiveKind::Int32, Value::Int(i)) => {
                i32::try_from(*i).ok().map(|i| i.to_string())
            }
            (PrimitiveKind::Int64, Value::Int(i)) => Some(format!("{}L", i)),
            (PrimitiveKind::Double, Value::Float(f)) => {
                f.is_finite().then(|| format!("{:?}D", f))
            }
            (PrimitiveKind::Double, Value::Int(i)) => Some(format!("{:?}D", *i as f64)),
            (PrimitiveKind::Decimal, Value::Decimal(d)) => {
                matches(decimal_pattern(), d).then(|| format!("{}M", normalize_decimal(d)))
            }
            (PrimitiveKind::Decimal, Value::Int(i)) => Some(format!("{}M", i)),
            (PrimitiveKind::String, Value::String(s)) => {
                Some(format!("'{}'", s.replace('\'', "''")))
            }
            (PrimitiveKind::Guid, Value::Guid(g)) => Some(format!("guid'{}'", g.to_lowercase())),
            (PrimitiveKind::DateTime, Value::DateTime(dt)) => Some(format!("datetime'{}'", dt)),
            _ => None,
        }
    }

    /// Parse literal text (as found in a key predicate) into a typed value.
    pub fn parse_literal(&self, text: &str) -> Option<Value> {
        let text = text.trim();
        match self {
            PrimitiveKind::Boolean => match text {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            PrimitiveKind::Int32 => text.parse::<i32>().ok().map(|i| Value::Int(i as i64)),
            PrimitiveKind::Int64 => strip_suffix_ci(text, 'L').parse::<i64>().ok().map(Value::Int),
            PrimitiveKind::Double => {
                let body = strip_suffix_ci(text, 'D');
                if body.is_empty() || body.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
                    return None;
                }
                body.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Value::Float)
            }
            PrimitiveKind::Decimal => {
                decimal_value(strip_suffix_ci(text, 'M'))
            }
            PrimitiveKind::String => unquote(text, "").map(Value::String),
            PrimitiveKind::Guid => unquote(text, "guid")
                .filter(|g| matches(guid_pattern(), g))
                .map(|g| Value::Guid(g.to_lowercase())),
            PrimitiveKind::DateTime => unquote(text, "datetime")
                .filter(|dt| matches(datetime_pattern(), dt))
                .map(Value::DateTime),
        }
    }

    /// Convert a raw wire value into a typed value of this kind.
    ///
    /// JSON null becomes `Value::Null`; nullability is the caller's concern.
    /// Int64 and Decimal also accept their string encodings.
    pub fn from_json(&self, raw: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;
        if raw.is_null() {
            return Some(Value::Null);
        }
        match (self, raw) {
            (PrimitiveKind::Boolean, Json::Bool(b)) => Some(Value::Bool(*b)),
            (PrimitiveKind::Int32, Json::Number(n)) => n
                .as_i64()
                .filter(|i| i32::try_from(*i).is_ok())
                .map(Value::Int),
            (PrimitiveKind::Int64, Json::Number(n)) => n.as_i64().map(Value::Int),
            (PrimitiveKind::Int64, Json::String(s)) => s.parse::<i64>().ok().map(Value::Int),
            (PrimitiveKind::Double, Json::Number(n)) => n.as_f64().map(Value::Float),
            (PrimitiveKind::Decimal, Json::Number(n)) => decimal_value(&n.to_string()),
            (PrimitiveKind::Decimal, Json::String(s)) => decimal_value(s),
            (PrimitiveKind::String, Json::String(s)) => Some(Value::String(s.clone())),
            (PrimitiveKind::Guid, Json::String(s)) => {
                matches(guid_pattern(), s).then(|| Value::Guid(s.to_lowercase()))
            }
            (PrimitiveKind::DateTime, Json::String(s)) => {
                matches(datetime_pattern(), s).then(|| Value::DateTime(s.clone()))
            }
            _ => None,
        }
    }

    /// Name used in error messages and catalog dumps.
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Int32 => "Int32",
            PrimitiveKind::Int64 => "Int64",
            PrimitiveKind::Double => "Double",
            PrimitiveKind::Decimal => "Decimal",
            PrimitiveKind::String => "String",
            PrimitiveKind::Guid => "Guid",
            PrimitiveKind::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
