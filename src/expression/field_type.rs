//! Type codes accepted by `field_type()`.

use std::fmt;
use std::str::FromStr;

use crate::document::{Value, ValueKind};

/// A `field_type()` type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTypeCode {
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

impl FieldTypeCode {
    /// Check whether `value` is of this type
    ///
    /// Set codes only match the dedicated set variants, never a plain list.
    pub fn matches(&self, value: &Value) -> bool {
        let kind = value.kind();
        match self {
            FieldTypeCode::String => kind == ValueKind::String,
            FieldTypeCode::Number => kind == ValueKind::Number,
            FieldTypeCode::Binary => kind == ValueKind::Binary,
            FieldTypeCode::Bool => kind == ValueKind::Bool,
            FieldTypeCode::Null => kind == ValueKind::Null,
            FieldTypeCode::List => kind == ValueKind::List,
            FieldTypeCode::Map => kind == ValueKind::Map,
            FieldTypeCode::StringSet => value.is_set() && kind == ValueKind::StringSet,
            FieldTypeCode::NumberSet => value.is_set() && kind == ValueKind::NumberSet,
            FieldTypeCode::BinarySet => value.is_set() && kind == ValueKind::BinarySet,
        }
    }

    /// Get the type code string
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldTypeCode::String => "S",
            FieldTypeCode::Number => "N",
            FieldTypeCode::Binary => "B",
            FieldTypeCode::Bool => "BOOL",
            FieldTypeCode::Null => "NULL",
            FieldTypeCode::List => "L",
            FieldTypeCode::Map => "M",
            FieldTypeCode::StringSet => "SS",
            FieldTypeCode::NumberSet => "NS",
            FieldTypeCode::BinarySet => "BS",
        }
    }
}

impl FromStr for FieldTypeCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(FieldTypeCode::String),
            "N" => Ok(FieldTypeCode::Number),
            "B" => Ok(FieldTypeCode::Binary),
            "BOOL" => Ok(FieldTypeCode::Bool),
            "NULL" => Ok(FieldTypeCode::Null),
            "L" => Ok(FieldTypeCode::List),
            "M" => Ok(FieldTypeCode::Map),
            "SS" => Ok(FieldTypeCode::StringSet),
            "NS" => Ok(FieldTypeCode::NumberSet),
            "BS" => Ok(FieldTypeCode::BinarySet),
            other => Err(format!("unknown type '{}'", other)),
        }
    }
}

impl fmt::Display for FieldTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
