//! Operator definitions for condition expressions.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Relational operators applied by the comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Equals,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl CompareOp {
    /// Check whether an ordering between two values satisfies this operator
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Equals => ordering == Ordering::Equal,
            CompareOp::Less => ordering == Ordering::Less,
            CompareOp::LessOrEqual => ordering != Ordering::Greater,
            CompareOp::Greater => ordering == Ordering::Greater,
            CompareOp::GreaterOrEqual => ordering != Ordering::Less,
        }
    }
}

/// Comparison operators that can appear in an expression tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOperator {
    /// Get the comparator operator and whether its result is negated
    ///
    /// `<>` is evaluated as the negation of `=`.
    pub fn compare_op(&self) -> (CompareOp, bool) {
        match self {
            ComparisonOperator::Eq => (CompareOp::Equals, false),
            ComparisonOperator::Ne => (CompareOp::Equals, true),
            ComparisonOperator::Lt => (CompareOp::Less, false),
            ComparisonOperator::Le => (CompareOp::LessOrEqual, false),
            ComparisonOperator::Gt => (CompareOp::Greater, false),
            ComparisonOperator::Ge => (CompareOp::GreaterOrEqual, false),
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "<>",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Ge => ">=",
        }
    }
}
