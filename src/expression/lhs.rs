//! Left-hand operand resolution for comparisons.

use crate::document::{Document, FieldLocator, Number, Value};
use crate::expression::alias::AliasResolver;
use crate::expression::{ConditionError, ConditionExpr, ConditionResult};

/// Resolved left-hand operand
#[derive(Debug, Clone, PartialEq)]
pub enum Lhs {
    /// Field name to look up in the document
    Field(String),
    /// Computed size(field)
    Size(Value),
}

impl Lhs {
    /// Get the value this operand stands for, `None` if the field is missing
    pub fn value<'d>(
        &'d self,
        document: &'d Document,
        locator: &dyn FieldLocator,
    ) -> Option<&'d Value> {
        match self {
            Lhs::Field(field) => locator.locate(document, field),
            Lhs::Size(size) => Some(size),
        }
    }
}

/// Resolve a comparison's left-hand node
pub fn resolve_lhs(
    node: &ConditionExpr,
    document: &Document,
    aliases: &AliasResolver<'_>,
    locator: &dyn FieldLocator,
) -> ConditionResult<Lhs> {
    match node {
        ConditionExpr::Literal(field) => Ok(Lhs::Field(aliases.resolve(field))),
        ConditionExpr::Size(field) => {
            let field = aliases.resolve(field);
            let size = size_of(locator.locate(document, &field))?;
            Ok(Lhs::Size(Value::Number(Number::Int64(size as i64))))
        }
        other => Err(ConditionError::UnrecognizedNodeKind {
            node: other.kind_name().to_string(),
        }),
    }
}

/// Size of a field value as defined by size()
///
/// Strings count characters, binaries bytes, containers their members. A
/// missing field has size 0.
pub fn size_of(value: Option<&Value>) -> ConditionResult<usize> {
    let value = match value {
        Some(value) => value,
        None => return Ok(0),
    };

    if let Some(len) = value.set_len() {
        return Ok(len);
    }
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::Binary(b) => Ok(b.len()),
        Value::List(l) => Ok(l.len()),
        Value::Map(m) => Ok(m.len()),
        other => Err(ConditionError::InvalidArgumentType {
            function: "size".to_string(),
            message: format!(
                "unsupported type {}, supported types: S, B, L, M, SS, NS, BS",
                other.kind()
            ),
        }),
    }
}
