//! Typed comparison between document values and placeholder values.

use crate::document::Value;
use crate::expression::operator::CompareOp;

/// Compare a document value against a placeholder value
///
/// Both sides must be present and of the same kind, otherwise the result is
/// `false`. `Equals` works for every kind; the ordering operators only for
/// numbers, strings and binaries.
pub fn compare_values(value: Option<&Value>, literal: Option<&Value>, op: CompareOp) -> bool {
    let (value, literal) = match (value, literal) {
        (Some(value), Some(literal)) => (value, literal),
        _ => return false,
    };

    match op {
        CompareOp::Equals => value == literal,
        _ => value
            .ordering(literal)
            .map(|ordering| op.accepts(ordering))
            .unwrap_or(false),
    }
}
