use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime kind of a value, one per `Value` variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Binary,
    Bool,
    Null,
    List,
    Map,
    StringSet,
    NumberSet,
    BinarySet,
}

impl ValueKind {
    /// Get the short type code used by `field_type()` and the JSON form
    pub fn code(&self) -> &'static str {
        match self {
            ValueKind::String => "S",
            ValueKind::Number => "N",
            ValueKind::Binary => "B",
            ValueKind::Bool => "BOOL",
            ValueKind::Null => "NULL",
            ValueKind::List => "L",
            ValueKind::Map => "M",
            ValueKind::StringSet => "SS",
            ValueKind::NumberSet => "NS",
            ValueKind::BinarySet => "BS",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Numeric value in one of the widths a document encoding can carry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int32(i32),
    Int64(i64),
    Double(f64),
}

impl Number {
    fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int32(n) => Some(i64::from(*n)),
            Number::Int64(n) => Some(*n),
            Number::Double(_) => None,
        }
    }

    /// Get the value as a double
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int32(n) => f64::from(*n),
            Number::Int64(n) => *n as f64,
            Number::Double(n) => *n,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    /// Compare by exact magnitude; NaN is unordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (Some(a), None) => cmp_int_double(a, other.as_f64()),
            (None, Some(b)) => cmp_int_double(b, self.as_f64()).map(Ordering::reverse),
            (None, None) => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// 2^63, the first double above the i64 range
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Compare an integer with a double without rounding the integer
fn cmp_int_double(int: i64, double: f64) -> Option<Ordering> {
    if double.is_nan() {
        return None;
    }
    if double >= I64_UPPER_BOUND {
        return Some(Ordering::Less);
    }
    if double < -I64_UPPER_BOUND {
        return Some(Ordering::Greater);
    }

    let whole = double.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&double),
        ordering => Some(ordering),
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int32(n)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int64(n)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Double(n)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int32(n) => write!(f, "{}", n),
            Number::Int64(n) => write!(f, "{}", n),
            Number::Double(n) => write!(f, "{}", n),
        }
    }
}

/// Values that can be held by a document field
///
/// The serialized form is tagged with the type code, e.g. `{"S": "abc"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    #[serde(rename = "S")]
    String(String),
    #[serde(rename = "N")]
    Number(Number),
    #[serde(rename = "B")]
    Binary(Vec<u8>),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null,
    #[serde(rename = "L")]
    List(Vec<Value>),
    #[serde(rename = "M")]
    Map(BTreeMap<String, Value>),
    #[serde(rename = "SS")]
    StringSet(Vec<String>),
    #[serde(rename = "NS")]
    NumberSet(Vec<Number>),
    #[serde(rename = "BS")]
    BinarySet(Vec<Vec<u8>>),
}

impl Value {
    /// Get the runtime kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Binary(_) => ValueKind::Binary,
            Value::Bool(_) => ValueKind::Bool,
            Value::Null => ValueKind::Null,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::StringSet(_) => ValueKind::StringSet,
            Value::NumberSet(_) => ValueKind::NumberSet,
            Value::BinarySet(_) => ValueKind::BinarySet,
        }
    }

    /// Check if this value is one of the specialized set kinds
    pub fn is_set(&self) -> bool {
        matches!(
            self,
            Value::StringSet(_) | Value::NumberSet(_) | Value::BinarySet(_)
        )
    }

    /// Number of members if this value is a set
    pub fn set_len(&self) -> Option<usize> {
        match self {
            Value::StringSet(s) => Some(s.len()),
            Value::NumberSet(s) => Some(s.len()),
            Value::BinarySet(s) => Some(s.len()),
            _ => None,
        }
    }

    /// Check whether a set value holds a member equal to `member`
    ///
    /// Returns false for non-set values and for members of the wrong kind.
    pub fn set_contains(&self, member: &Value) -> bool {
        match (self, member) {
            (Value::StringSet(set), Value::String(s)) => set.contains(s),
            (Value::NumberSet(set), Value::Number(n)) => set.contains(n),
            (Value::BinarySet(set), Value::Binary(b)) => set.contains(b),
            _ => false,
        }
    }

    /// Order two values of the same orderable kind
    ///
    /// Numbers compare by magnitude, strings and binaries by byte order.
    /// Returns `None` for mismatched kinds and for kinds with no ordering.
    pub fn ordering(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
            (Value::Binary(a), Value::Binary(b)) => Some(a.as_slice().cmp(b.as_slice())),
            _ => None,
        }
    }
}

/// Set equality: same cardinality and every member of `a` present in `b`
fn same_members<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|m| b.contains(m))
}

impl PartialEq for Value {
    /// Same-kind equality; values of different kinds are never equal
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::StringSet(a), Value::StringSet(b)) => same_members(a, b),
            (Value::NumberSet(a), Value::NumberSet(b)) => same_members(a, b),
            (Value::BinarySet(a), Value::BinarySet(b)) => same_members(a, b),
            _ => false,
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

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::Int32(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Int64(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Double(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Binary(b)
    }
}
