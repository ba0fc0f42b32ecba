//! Error types for condition evaluation.
//!
//! Only structural problems are errors. A missing field, a missing comparison
//! value or a cross-kind comparison evaluates to `false` instead.

use thiserror::Error;

/// Errors that abort a condition evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConditionError {
    /// A node appeared where the evaluator cannot interpret it
    #[error("Expression node '{node}' is not recognized for document comparison")]
    UnrecognizedNodeKind { node: String },

    /// A function received an operand of an unsupported kind
    #[error("Invalid argument for {function}(): {message}")]
    InvalidArgumentType { function: String, message: String },

    /// field_type() could not resolve its type code
    #[error(
        "Unresolvable type code for placeholder '{placeholder}': {reason}, \
         valid types: {{N,BS,L,B,NULL,M,S,SS,NS,BOOL}}"
    )]
    UnresolvableTypeCode { placeholder: String, reason: String },

    /// AND / OR node without operands
    #[error("{operator} requires at least one operand")]
    EmptyOperands { operator: String },

    /// Expression nesting is deeper than the configured limit
    #[error("Expression depth exceeds maximum of {max_depth}")]
    DepthLimitExceeded { max_depth: usize },
}

/// Result type for condition evaluation
pub type ConditionResult<T> = Result<T, ConditionError>;
