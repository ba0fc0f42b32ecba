//! Condition expression evaluation for document-valued data.
//!
//! This module provides:
//! - Condition expression tree representation
//! - Field name alias substitution
//! - Typed, same-kind comparison of document values
//! - Evaluation of predicate functions (exists, begins_with, contains,
//!   field_type, size) and boolean connectives against a document

pub mod alias;
pub mod compare;
pub mod error;
pub mod eval;
pub mod expr;
pub mod field_type;
pub mod lhs;
pub mod operator;

pub use alias::{sort_alias_tokens, AliasResolver, AliasTable};
pub use compare::compare_values;
pub use error::{ConditionError, ConditionResult};
pub use eval::{
    condition_to_predicate, evaluate_condition, ConditionEvaluator, EvaluatorConfig,
    PlaceholderTable, Predicate,
};
pub use expr::ConditionExpr;
pub use field_type::FieldTypeCode;
pub use lhs::{resolve_lhs, size_of, Lhs};
pub use operator::{CompareOp, ComparisonOperator};
