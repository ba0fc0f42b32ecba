//! Condition expression tree definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expression::operator::ComparisonOperator;

/// Condition expression tree node
///
/// Field names may contain alias tokens; every other string operand is a
/// placeholder token resolved through the placeholder table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionExpr {
    /// Field name (in LHS position) as written in the expression
    Literal(String),

    /// size(field)
    Size(String),

    /// Conjunction, evaluated left to right
    And(Vec<ConditionExpr>),

    /// Disjunction, evaluated left to right
    Or(Vec<ConditionExpr>),

    /// NOT expr
    Not(Box<ConditionExpr>),

    /// lhs <op> :placeholder
    Compare {
        op: ComparisonOperator,
        lhs: Box<ConditionExpr>,
        rhs: String,
    },

    /// lhs [NOT] BETWEEN :low AND :high
    Between {
        lhs: Box<ConditionExpr>,
        low: String,
        high: String,
        #[serde(default)]
        negated: bool,
    },

    /// lhs [NOT] IN (:a, :b, ...)
    In {
        lhs: Box<ConditionExpr>,
        list: Vec<String>,
        #[serde(default)]
        negated: bool,
    },

    /// attribute_exists(field) or attribute_not_exists(field)
    Exists {
        field: String,
        #[serde(default)]
        negated: bool,
    },

    /// begins_with(field, :prefix)
    BeginsWith { field: String, prefix: String },

    /// contains(field, :value)
    Contains { field: String, value: String },

    /// field_type(field, :type)
    FieldType { field: String, type_code: String },
}

impl ConditionExpr {
    /// Create a field name literal
    pub fn literal(field: impl Into<String>) -> Self {
        ConditionExpr::Literal(field.into())
    }

    /// Create a size(field) operand
    pub fn size(field: impl Into<String>) -> Self {
        ConditionExpr::Size(field.into())
    }

    /// Create an AND over `children`
    pub fn and(children: Vec<ConditionExpr>) -> Self {
        ConditionExpr::And(children)
    }

    /// Create an OR over `children`
    pub fn or(children: Vec<ConditionExpr>) -> Self {
        ConditionExpr::Or(children)
    }

    /// Create a NOT expression
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: ConditionExpr) -> Self {
        ConditionExpr::Not(Box::new(child))
    }

    /// Create a comparison expression
    pub fn compare(op: ComparisonOperator, lhs: ConditionExpr, rhs: impl Into<String>) -> Self {
        ConditionExpr::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: rhs.into(),
        }
    }

    /// Create an equality expression
    pub fn eq(lhs: ConditionExpr, rhs: impl Into<String>) -> Self {
        Self::compare(ComparisonOperator::Eq, lhs, rhs)
    }

    /// Create a not-equal expression
    pub fn ne(lhs: ConditionExpr, rhs: impl Into<String>) -> Self {
        Self::compare(ComparisonOperator::Ne, lhs, rhs)
    }

    /// Create a less-than expression
    pub fn lt(lhs: ConditionExpr, rhs: impl Into<String>) -> Self {
        Self::compare(ComparisonOperator::Lt, lhs, rhs)
    }

    /// Create a less-than-or-equal expression
    pub fn le(lhs: ConditionExpr, rhs: impl Into<String>) -> Self {
        Self::compare(ComparisonOperator::Le, lhs, rhs)
    }

    /// Create a greater-than expression
    pub fn gt(lhs: ConditionExpr, rhs: impl Into<String>) -> Self {
        Self::compare(ComparisonOperator::Gt, lhs, rhs)
    }

    /// Create a greater-than-or-equal expression
    pub fn ge(lhs: ConditionExpr, rhs: impl Into<String>) -> Self {
        Self::compare(ComparisonOperator::Ge, lhs, rhs)
    }

    /// Create a BETWEEN expression (inclusive on both ends)
    pub fn between(lhs: ConditionExpr, low: impl Into<String>, high: impl Into<String>) -> Self {
        ConditionExpr::Between {
            lhs: Box::new(lhs),
            low: low.into(),
            high: high.into(),
            negated: false,
        }
    }

    /// Create a NOT BETWEEN expression
    pub fn not_between(
        lhs: ConditionExpr,
        low: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        ConditionExpr::Between {
            lhs: Box::new(lhs),
            low: low.into(),
            high: high.into(),
            negated: true,
        }
    }

    /// Create an IN expression
    pub fn in_list<S: Into<String>>(lhs: ConditionExpr, list: impl IntoIterator<Item = S>) -> Self {
        ConditionExpr::In {
            lhs: Box::new(lhs),
            list: list.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// Create a NOT IN expression
    pub fn not_in_list<S: Into<String>>(
        lhs: ConditionExpr,
        list: impl IntoIterator<Item = S>,
    ) -> Self {
        ConditionExpr::In {
            lhs: Box::new(lhs),
            list: list.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    /// Create an attribute_exists(field) expression
    pub fn exists(field: impl Into<String>) -> Self {
        ConditionExpr::Exists {
            field: field.into(),
            negated: false,
        }
    }

    /// Create an attribute_not_exists(field) expression
    pub fn not_exists(field: impl Into<String>) -> Self {
        ConditionExpr::Exists {
            field: field.into(),
            negated: true,
        }
    }

    /// Create a begins_with(field, :prefix) expression
    pub fn begins_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        ConditionExpr::BeginsWith {
            field: field.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a contains(field, :value) expression
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        ConditionExpr::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a field_type(field, :type) expression
    pub fn field_type(field: impl Into<String>, type_code: impl Into<String>) -> Self {
        ConditionExpr::FieldType {
            field: field.into(),
            type_code: type_code.into(),
        }
    }

    /// Name of this node's kind, without its operands
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConditionExpr::Literal(_) => "literal",
            ConditionExpr::Size(_) => "size",
            ConditionExpr::And(_) => "AND",
            ConditionExpr::Or(_) => "OR",
            ConditionExpr::Not(_) => "NOT",
            ConditionExpr::Compare { .. } => "comparison",
            ConditionExpr::Between { .. } => "BETWEEN",
            ConditionExpr::In { .. } => "IN",
            ConditionExpr::Exists { negated: false, .. } => "attribute_exists",
            ConditionExpr::Exists { negated: true, .. } => "attribute_not_exists",
            ConditionExpr::BeginsWith { .. } => "begins_with",
            ConditionExpr::Contains { .. } => "contains",
            ConditionExpr::FieldType { .. } => "field_type",
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth > MAX_DISPLAY_DEPTH {
            return write!(f, "...");
        }
        match self {
            ConditionExpr::Literal(field) => write!(f, "{}", field),
            ConditionExpr::Size(field) => write!(f, "size({})", field),
            ConditionExpr::And(children) => write_joined(f, children, "AND", depth),
            ConditionExpr::Or(children) => write_joined(f, children, "OR", depth),
            ConditionExpr::Not(inner) => write!(f, "NOT {}", Rendered(inner, depth + 1)),
            ConditionExpr::Compare { op, lhs, rhs } => {
                write!(f, "{} {} {}", Rendered(lhs, depth + 1), op.as_str(), rhs)
            }
            ConditionExpr::Between {
                lhs,
                low,
                high,
                negated,
            } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{} {}BETWEEN {} AND {}", Rendered(lhs, depth + 1), not, low, high)
            }
            ConditionExpr::In { lhs, list, negated } => {
                let not = if *negated { "NOT " } else { "" };
                write!(f, "{} {}IN ({})", Rendered(lhs, depth + 1), not, list.join(", "))
            }
            ConditionExpr::Exists { field, negated } => {
                if *negated {
                    write!(f, "attribute_not_exists({})", field)
                } else {
                    write!(f, "attribute_exists({})", field)
                }
            }
            ConditionExpr::BeginsWith { field, prefix } => {
                write!(f, "begins_with({}, {})", field, prefix)
            }
            ConditionExpr::Contains { field, value } => {
                write!(f, "contains({}, {})", field, value)
            }
            ConditionExpr::FieldType { field, type_code } => {
                write!(f, "field_type({}, {})", field, type_code)
            }
        }
    }
}

/// Nodes nested deeper than this render as `...`
const MAX_DISPLAY_DEPTH: usize = 32;

struct Rendered<'a>(&'a ConditionExpr, usize);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_at(f, self.1)
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    items: &[ConditionExpr],
    sep: &str,
    depth: usize,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", Rendered(item, depth + 1))?;
    }
    write!(f, ")")
}

impl fmt::Display for ConditionExpr {
    /// Renders the node in condition expression syntax
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 1)
    }
}
