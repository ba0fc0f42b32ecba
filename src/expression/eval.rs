//! Condition expression evaluation implementation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::{Document, FieldLocator, PathLocator, Value};
use crate::expression::alias::{AliasResolver, AliasTable};
use crate::expression::compare::compare_values;
use crate::expression::field_type::FieldTypeCode;
use crate::expression::lhs::resolve_lhs;
use crate::expression::operator::CompareOp;
use crate::expression::{ConditionError, ConditionExpr, ConditionResult};

/// Placeholder token (e.g. `:v1`) to literal value
pub type PlaceholderTable = BTreeMap<String, Value>;

/// Default limit on expression nesting.
const DEFAULT_MAX_DEPTH: usize = 64;

/// Evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Maximum nesting depth of boolean nodes before evaluation fails.
    pub max_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Evaluator for condition expressions against one document
pub struct ConditionEvaluator<'a> {
    /// The document to evaluate against
    document: &'a Document,
    /// Values referenced by placeholder tokens
    placeholders: &'a PlaceholderTable,
    /// Field name alias substitution
    aliases: AliasResolver<'a>,
    /// Nested path resolution
    locator: &'a dyn FieldLocator,
    config: EvaluatorConfig,
}

impl<'a> ConditionEvaluator<'a> {
    /// Create a new evaluator with no aliases and the default path locator
    pub fn new(document: &'a Document, placeholders: &'a PlaceholderTable) -> Self {
        Self {
            document,
            placeholders,
            aliases: AliasResolver::empty(),
            locator: &PathLocator,
            config: EvaluatorConfig::default(),
        }
    }

    /// Substitute field name aliases from `aliases`
    pub fn with_aliases(mut self, aliases: &'a AliasTable) -> Self {
        self.aliases = AliasResolver::new(aliases);
        self
    }

    /// Resolve field paths with a custom locator
    pub fn with_locator(mut self, locator: &'a dyn FieldLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Replace the evaluator configuration
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluate a condition expression to a verdict
    pub fn evaluate(&self, expr: &ConditionExpr) -> ConditionResult<bool> {
        let result = self.evaluate_at(expr, 1);
        match &result {
            Ok(verdict) => log::debug!("condition {} evaluated to {}", expr, verdict),
            Err(e) => log::debug!("condition {} failed: {}", expr, e),
        }
        result
    }

    fn evaluate_at(&self, expr: &ConditionExpr, depth: usize) -> ConditionResult<bool> {
        if depth > self.config.max_depth {
            log::warn!(
                "condition nesting exceeds maximum depth of {}",
                self.config.max_depth
            );
            return Err(ConditionError::DepthLimitExceeded {
                max_depth: self.config.max_depth,
            });
        }

        match expr {
            ConditionExpr::Exists { field, negated } => Ok(self.exists(field) != *negated),

            ConditionExpr::BeginsWith { field, prefix } => self.begins_with(field, prefix),

            ConditionExpr::Contains { field, value } => Ok(self.contains(field, value)),

            ConditionExpr::FieldType { field, type_code } => {
                self.is_field_of_type(field, type_code)
            }

            ConditionExpr::Compare { op, lhs, rhs } => {
                let (compare_op, negated) = op.compare_op();
                Ok(self.compare(lhs, rhs, compare_op)? != negated)
            }

            ConditionExpr::Between {
                lhs,
                low,
                high,
                negated,
            } => Ok(self.between(lhs, low, high)? != *negated),

            ConditionExpr::In { lhs, list, negated } => Ok(self.in_list(lhs, list)? != *negated),

            ConditionExpr::And(children) => {
                if children.is_empty() {
                    return Err(ConditionError::EmptyOperands {
                        operator: "AND".to_string(),
                    });
                }
                for child in children {
                    if !self.evaluate_at(child, depth + 1)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            ConditionExpr::Or(children) => {
                if children.is_empty() {
                    return Err(ConditionError::EmptyOperands {
                        operator: "OR".to_string(),
                    });
                }
                for child in children {
                    if self.evaluate_at(child, depth + 1)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            ConditionExpr::Not(child) => Ok(!self.evaluate_at(child, depth + 1)?),

            ConditionExpr::Literal(_) | ConditionExpr::Size(_) => {
                Err(ConditionError::UnrecognizedNodeKind {
                    node: expr.to_string(),
                })
            }
        }
    }

    /// Look up the value of an (alias-bearing) field name
    fn field_value(&self, field: &str) -> Option<&'a Value> {
        let field = self.aliases.resolve(field);
        self.locator.locate(self.document, &field)
    }

    fn placeholder(&self, token: &str) -> Option<&'a Value> {
        let value = self.placeholders.get(token);
        if value.is_none() {
            log::debug!("no value bound for placeholder '{}'", token);
        }
        value
    }

    fn exists(&self, field: &str) -> bool {
        self.field_value(field).is_some()
    }

    /// begins_with() supports String and Binary operands only
    fn begins_with(&self, field: &str, prefix: &str) -> ConditionResult<bool> {
        let value = match self.field_value(field) {
            Some(value) => value,
            None => return Ok(false),
        };
        let prefix = match self.placeholder(prefix) {
            Some(prefix) => prefix,
            None => return Ok(false),
        };

        match (value, prefix) {
            (Value::String(s), Value::String(p)) => Ok(s.starts_with(p.as_str())),
            (Value::Binary(b), Value::Binary(p)) => Ok(b.starts_with(p)),
            (Value::String(_) | Value::Binary(_), Value::String(_) | Value::Binary(_)) => Ok(false),
            (value, prefix) => Err(ConditionError::InvalidArgumentType {
                function: "begins_with".to_string(),
                message: format!(
                    "only S and B are supported, got {} and {}",
                    value.kind(),
                    prefix.kind()
                ),
            }),
        }
    }

    /// Substring for strings, membership for lists and sets, false otherwise
    fn contains(&self, field: &str, needle: &str) -> bool {
        let (value, needle) = match (self.field_value(field), self.placeholder(needle)) {
            (Some(value), Some(needle)) => (value, needle),
            _ => return false,
        };

        match value {
            Value::String(s) => match needle {
                Value::String(n) => s.contains(n.as_str()),
                _ => false,
            },
            Value::List(items) => items.iter().any(|item| item == needle),
            set if set.is_set() => set.set_contains(needle),
            _ => false,
        }
    }

    fn is_field_of_type(&self, field: &str, type_placeholder: &str) -> ConditionResult<bool> {
        let value = match self.field_value(field) {
            Some(value) => value,
            None => return Ok(false),
        };

        let code = match self.placeholder(type_placeholder) {
            Some(Value::String(code)) => code.parse::<FieldTypeCode>().map_err(|reason| {
                ConditionError::UnresolvableTypeCode {
                    placeholder: type_placeholder.to_string(),
                    reason,
                }
            })?,
            Some(other) => {
                return Err(ConditionError::UnresolvableTypeCode {
                    placeholder: type_placeholder.to_string(),
                    reason: format!("expected a S value, got {}", other.kind()),
                })
            }
            None => {
                return Err(ConditionError::UnresolvableTypeCode {
                    placeholder: type_placeholder.to_string(),
                    reason: "no value bound".to_string(),
                })
            }
        };
        Ok(code.matches(value))
    }

    fn compare(&self, lhs: &ConditionExpr, rhs: &str, op: CompareOp) -> ConditionResult<bool> {
        let lhs = resolve_lhs(lhs, self.document, &self.aliases, self.locator)?;
        let value = lhs.value(self.document, self.locator);
        Ok(compare_values(value, self.placeholder(rhs), op))
    }

    /// Inclusive on both ends
    fn between(&self, lhs: &ConditionExpr, low: &str, high: &str) -> ConditionResult<bool> {
        let lhs = resolve_lhs(lhs, self.document, &self.aliases, self.locator)?;
        let value = lhs.value(self.document, self.locator);
        Ok(
            compare_values(value, self.placeholder(low), CompareOp::GreaterOrEqual)
                && compare_values(value, self.placeholder(high), CompareOp::LessOrEqual),
        )
    }

    fn in_list(&self, lhs: &ConditionExpr, list: &[String]) -> ConditionResult<bool> {
        let lhs = resolve_lhs(lhs, self.document, &self.aliases, self.locator)?;
        let value = match lhs.value(self.document, self.locator) {
            Some(value) => value,
            None => return Ok(false),
        };
        Ok(list.iter().any(|token| {
            compare_values(Some(value), self.placeholder(token), CompareOp::Equals)
        }))
    }
}

/// Helper function to evaluate a condition against an optional document
///
/// A missing document is logged and evaluates to `false`.
pub fn evaluate_condition(
    expr: &ConditionExpr,
    document: Option<&Document>,
    placeholders: &PlaceholderTable,
    aliases: Option<&AliasTable>,
) -> ConditionResult<bool> {
    let document = match document {
        Some(document) => document,
        None => {
            log::warn!("no document to evaluate condition {} against", expr);
            return Ok(false);
        }
    };

    let evaluator = ConditionEvaluator::new(document, placeholders);
    match aliases {
        Some(aliases) => evaluator.with_aliases(aliases).evaluate(expr),
        None => evaluator.evaluate(expr),
    }
}

/// Type alias for reusable document predicates
pub type Predicate = Box<dyn Fn(&Document) -> ConditionResult<bool> + Send + Sync + 'static>;

/// Helper function to create a predicate function from a condition
pub fn condition_to_predicate(
    expr: ConditionExpr,
    placeholders: PlaceholderTable,
    aliases: AliasTable,
) -> Predicate {
    Box::new(move |document: &Document| {
        ConditionEvaluator::new(document, &placeholders)
            .with_aliases(&aliases)
            .evaluate(&expr)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Number;

    fn values(pairs: Vec<(&str, Value)>) -> PlaceholderTable {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn sample_doc() -> Document {
        let mut address = BTreeMap::new();
        address.insert("city".to_string(), Value::from("Portland"));
        address.insert("zip".to_string(), Value::from("97201"));

        let mut doc = Document::new();
        doc.insert("name".to_string(), Value::from("Alice"));
        doc.insert("age".to_string(), Value::from(30));
        doc.insert("active".to_string(), Value::from(true));
        doc.insert("score".to_string(), Value::from(95.5));
        doc.insert("avatar".to_string(), Value::from(vec![0x89u8, 0x50, 0x4e, 0x47]));
        doc.insert("address".to_string(), Value::Map(address));
        doc.insert(
            "tags".to_string(),
            Value::List(vec![Value::from("admin"), Value::from("user"), Value::from(7)]),
        );
        doc.insert(
            "roles".to_string(),
            Value::StringSet(vec!["reader".to_string(), "writer".to_string()]),
        );
        doc.insert(
            "lucky".to_string(),
            Value::NumberSet(vec![Number::Int32(3), Number::Double(7.5)]),
        );
        doc.insert(
            "keys".to_string(),
            Value::BinarySet(vec![vec![0x01, 0x02], vec![0xff]]),
        );
        doc.insert("metadata".to_string(), Value::Null);
        doc
    }

    fn eval(expr: &ConditionExpr, placeholders: &PlaceholderTable) -> ConditionResult<bool> {
        let doc = sample_doc();
        ConditionEvaluator::new(&doc, placeholders).evaluate(expr)
    }

    #[test]
    fn test_exists() {
        let none = PlaceholderTable::new();
        assert!(eval(&ConditionExpr::exists("name"), &none).unwrap());
        assert!(eval(&ConditionExpr::exists("metadata"), &none).unwrap());
        assert!(eval(&ConditionExpr::exists("address.city"), &none).unwrap());
        assert!(!eval(&ConditionExpr::exists("missing"), &none).unwrap());
        assert!(eval(&ConditionExpr::not_exists("missing"), &none).unwrap());
        assert!(!eval(&ConditionExpr::not_exists("name"), &none).unwrap());
    }

    #[test]
    fn test_comparisons() {
        let placeholders = values(vec![
            (":v25", Value::from(25)),
            (":v30", Value::from(30i64)),
            (":alice", Value::from("Alice")),
            (":s", Value::from("30")),
        ]);
        let age = || ConditionExpr::literal("age");

        assert!(eval(&ConditionExpr::gt(age(), ":v25"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::ge(age(), ":v30"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::le(age(), ":v30"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::lt(age(), ":v30"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::eq(age(), ":v30"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::ne(age(), ":v25"), &placeholders).unwrap());
        assert!(eval(
            &ConditionExpr::eq(ConditionExpr::literal("name"), ":alice"),
            &placeholders
        )
        .unwrap());

        // Cross-kind comparison never matches
        assert!(!eval(&ConditionExpr::eq(age(), ":s"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::ne(age(), ":s"), &placeholders).unwrap());
    }

    #[test]
    fn test_large_integer_against_double() {
        let mut doc = Document::new();
        doc.insert("n".to_string(), Value::from(9_007_199_254_740_993i64));
        let placeholders = values(vec![(":v", Value::from(9_007_199_254_740_992.0))]);
        let evaluator = ConditionEvaluator::new(&doc, &placeholders);
        let n = || ConditionExpr::literal("n");

        assert!(!evaluator.evaluate(&ConditionExpr::eq(n(), ":v")).unwrap());
        assert!(evaluator.evaluate(&ConditionExpr::gt(n(), ":v")).unwrap());
        assert!(!evaluator.evaluate(&ConditionExpr::le(n(), ":v")).unwrap());
    }

    #[test]
    fn test_missing_operands_are_no_match() {
        let placeholders = values(vec![(":v", Value::from(1))]);

        // Missing field
        let expr = ConditionExpr::eq(ConditionExpr::literal("missing"), ":v");
        assert!(!eval(&expr, &placeholders).unwrap());
        // Missing placeholder
        let expr = ConditionExpr::lt(ConditionExpr::literal("age"), ":nope");
        assert!(!eval(&expr, &placeholders).unwrap());
        // Not-equal on a missing field
        let expr = ConditionExpr::ne(ConditionExpr::literal("missing"), ":v");
        assert!(eval(&expr, &placeholders).unwrap());
    }

    #[test]
    fn test_begins_with() {
        let placeholders = values(vec![
            (":al", Value::from("Al")),
            (":bob", Value::from("Bob")),
            (":png", Value::from(vec![0x89u8, 0x50])),
            (":long", Value::from(vec![0x89u8, 0x50, 0x4e, 0x47, 0x0d])),
            (":n", Value::from(1)),
        ]);

        assert!(eval(&ConditionExpr::begins_with("name", ":al"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::begins_with("name", ":bob"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::begins_with("avatar", ":png"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::begins_with("avatar", ":long"), &placeholders).unwrap());

        // String vs binary mismatch, missing field, missing prefix
        assert!(!eval(&ConditionExpr::begins_with("name", ":png"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::begins_with("avatar", ":al"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::begins_with("missing", ":al"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::begins_with("name", ":nope"), &placeholders).unwrap());

        // Any other kind is a caller error
        assert!(matches!(
            eval(&ConditionExpr::begins_with("age", ":al"), &placeholders),
            Err(ConditionError::InvalidArgumentType { .. })
        ));
        assert!(matches!(
            eval(&ConditionExpr::begins_with("name", ":n"), &placeholders),
            Err(ConditionError::InvalidArgumentType { .. })
        ));
    }

    #[test]
    fn test_contains() {
        let placeholders = values(vec![
            (":lic", Value::from("lic")),
            (":admin", Value::from("admin")),
            (":seven", Value::from(7i64)),
            (":writer", Value::from("writer")),
            (":three", Value::from(3.0)),
            (":x", Value::from("x")),
            (":n", Value::from(1)),
            (":key", Value::from(vec![0xffu8])),
            (":partial", Value::from(vec![0x01u8])),
        ]);

        assert!(eval(&ConditionExpr::contains("name", ":lic"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::contains("name", ":x"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::contains("name", ":n"), &placeholders).unwrap());

        assert!(eval(&ConditionExpr::contains("tags", ":admin"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::contains("tags", ":seven"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::contains("tags", ":x"), &placeholders).unwrap());

        assert!(eval(&ConditionExpr::contains("roles", ":writer"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::contains("lucky", ":three"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::contains("roles", ":n"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::contains("keys", ":key"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::contains("keys", ":partial"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::contains("keys", ":x"), &placeholders).unwrap());

        // Unsupported targets are no match
        assert!(!eval(&ConditionExpr::contains("age", ":n"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::contains("address", ":x"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::contains("missing", ":x"), &placeholders).unwrap());
    }

    #[test]
    fn test_field_type() {
        let placeholders = values(vec![
            (":S", Value::from("S")),
            (":N", Value::from("N")),
            (":M", Value::from("M")),
            (":L", Value::from("L")),
            (":SS", Value::from("SS")),
            (":NULL", Value::from("NULL")),
            (":BS", Value::from("BS")),
            (":B", Value::from("B")),
            (":BOOL", Value::from("BOOL")),
            (":bad", Value::from("LIST")),
            (":num", Value::from(1)),
        ]);

        assert!(eval(&ConditionExpr::field_type("name", ":S"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::field_type("score", ":N"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::field_type("address", ":M"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::field_type("metadata", ":NULL"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::field_type("roles", ":SS"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::field_type("tags", ":SS"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::field_type("tags", ":L"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::field_type("name", ":N"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::field_type("keys", ":BS"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::field_type("avatar", ":BS"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::field_type("avatar", ":B"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::field_type("keys", ":B"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::field_type("active", ":BOOL"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::field_type("name", ":BOOL"), &placeholders).unwrap());

        // Missing field is false before the code is even looked at
        assert!(!eval(&ConditionExpr::field_type("missing", ":bad"), &placeholders).unwrap());

        for code in [":bad", ":num", ":nope"] {
            assert!(matches!(
                eval(&ConditionExpr::field_type("name", code), &placeholders),
                Err(ConditionError::UnresolvableTypeCode { .. })
            ));
        }
    }

    #[test]
    fn test_size() {
        let placeholders = values(vec![
            (":three", Value::from(3)),
            (":two", Value::from(2)),
            (":zero", Value::from(0)),
            (":five", Value::from(5)),
        ]);

        let expr = ConditionExpr::eq(ConditionExpr::size("tags"), ":three");
        assert!(eval(&expr, &placeholders).unwrap());
        let expr = ConditionExpr::eq(ConditionExpr::size("roles"), ":two");
        assert!(eval(&expr, &placeholders).unwrap());
        let expr = ConditionExpr::eq(ConditionExpr::size("address"), ":two");
        assert!(eval(&expr, &placeholders).unwrap());
        let expr = ConditionExpr::eq(ConditionExpr::size("name"), ":five");
        assert!(eval(&expr, &placeholders).unwrap());
        let expr = ConditionExpr::eq(ConditionExpr::size("missing"), ":zero");
        assert!(eval(&expr, &placeholders).unwrap());

        let expr = ConditionExpr::gt(ConditionExpr::size("active"), ":zero");
        assert!(matches!(
            eval(&expr, &placeholders),
            Err(ConditionError::InvalidArgumentType { .. })
        ));
    }

    #[test]
    fn test_between() {
        let placeholders = values(vec![
            (":lo", Value::from(25)),
            (":hi", Value::from(30)),
            (":lower", Value::from(10)),
            (":s", Value::from("a")),
        ]);
        let age = || ConditionExpr::literal("age");

        assert!(eval(&ConditionExpr::between(age(), ":lo", ":hi"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::between(age(), ":hi", ":hi"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::between(age(), ":lower", ":lo"), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::not_between(age(), ":lo", ":hi"), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::not_between(age(), ":lower", ":lo"), &placeholders).unwrap());

        // Kind mismatch on one bound fails the whole range
        assert!(!eval(&ConditionExpr::between(age(), ":lo", ":s"), &placeholders).unwrap());

        let expr = ConditionExpr::between(ConditionExpr::size("tags"), ":lower", ":hi");
        assert!(!eval(&expr, &placeholders).unwrap());
    }

    #[test]
    fn test_in_list() {
        let placeholders = values(vec![
            (":a", Value::from("Bob")),
            (":b", Value::from("Alice")),
            (":c", Value::from(30)),
        ]);
        let name = || ConditionExpr::literal("name");

        assert!(eval(&ConditionExpr::in_list(name(), [":a", ":b"]), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::in_list(name(), [":a", ":c"]), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::not_in_list(name(), [":b"]), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::not_in_list(name(), [":a"]), &placeholders).unwrap());

        let expr = ConditionExpr::in_list(ConditionExpr::literal("missing"), [":a"]);
        assert!(!eval(&expr, &placeholders).unwrap());
        let expr = ConditionExpr::not_in_list(ConditionExpr::literal("missing"), [":a"]);
        assert!(eval(&expr, &placeholders).unwrap());
    }

    #[test]
    fn test_logical_operations() {
        let placeholders = values(vec![(":v", Value::from(30))]);
        let yes = || ConditionExpr::exists("name");
        let no = || ConditionExpr::exists("missing");

        assert!(eval(&ConditionExpr::and(vec![yes(), yes()]), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::and(vec![yes(), no()]), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::or(vec![no(), yes()]), &placeholders).unwrap());
        assert!(!eval(&ConditionExpr::or(vec![no(), no()]), &placeholders).unwrap());
        assert!(eval(&ConditionExpr::not(no()), &placeholders).unwrap());

        let expr = ConditionExpr::not(ConditionExpr::eq(ConditionExpr::literal("age"), ":v"));
        assert!(!eval(&expr, &placeholders).unwrap());
    }

    #[test]
    fn test_short_circuit() {
        let placeholders = PlaceholderTable::new();
        // The second child would fail with an error if it were evaluated
        let failing = || ConditionExpr::literal("name");

        let expr = ConditionExpr::and(vec![ConditionExpr::exists("missing"), failing()]);
        assert!(!eval(&expr, &placeholders).unwrap());

        let expr = ConditionExpr::or(vec![ConditionExpr::exists("name"), failing()]);
        assert!(eval(&expr, &placeholders).unwrap());

        let expr = ConditionExpr::and(vec![ConditionExpr::exists("name"), failing()]);
        assert!(matches!(
            eval(&expr, &placeholders),
            Err(ConditionError::UnrecognizedNodeKind { .. })
        ));
    }

    #[test]
    fn test_empty_operands() {
        let placeholders = PlaceholderTable::new();
        assert_eq!(
            eval(&ConditionExpr::and(vec![]), &placeholders),
            Err(ConditionError::EmptyOperands {
                operator: "AND".to_string()
            })
        );
        assert_eq!(
            eval(&ConditionExpr::or(vec![]), &placeholders),
            Err(ConditionError::EmptyOperands {
                operator: "OR".to_string()
            })
        );
    }

    #[test]
    fn test_unrecognized_nodes() {
        let placeholders = values(vec![(":v", Value::from(1))]);

        let result = eval(&ConditionExpr::size("tags"), &placeholders);
        assert_eq!(
            result,
            Err(ConditionError::UnrecognizedNodeKind {
                node: "size(tags)".to_string()
            })
        );

        let expr = ConditionExpr::eq(ConditionExpr::exists("name"), ":v");
        assert!(matches!(
            eval(&expr, &placeholders),
            Err(ConditionError::UnrecognizedNodeKind { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let placeholders = PlaceholderTable::new();
        let doc = sample_doc();

        let mut expr = ConditionExpr::exists("name");
        for _ in 0..4 {
            expr = ConditionExpr::not(expr);
        }

        // Five levels: four NOTs and the leaf
        let config = EvaluatorConfig { max_depth: 5 };
        let evaluator = ConditionEvaluator::new(&doc, &placeholders).with_config(config);
        assert!(evaluator.evaluate(&expr).unwrap());

        let config = EvaluatorConfig { max_depth: 4 };
        let evaluator = ConditionEvaluator::new(&doc, &placeholders).with_config(config);
        assert_eq!(
            evaluator.evaluate(&expr),
            Err(ConditionError::DepthLimitExceeded { max_depth: 4 })
        );
    }

    #[test]
    fn test_aliases() {
        let doc = sample_doc();
        let placeholders = values(vec![(":p", Value::from("Port"))]);
        let mut aliases = AliasTable::new();
        aliases.insert("#a".to_string(), "address".to_string());
        aliases.insert("#ac".to_string(), "bogus".to_string());
        aliases.insert("#c".to_string(), "city".to_string());

        let evaluator = ConditionEvaluator::new(&doc, &placeholders).with_aliases(&aliases);
        assert!(evaluator
            .evaluate(&ConditionExpr::begins_with("#a.#c", ":p"))
            .unwrap());
        assert!(!evaluator.evaluate(&ConditionExpr::exists("#ac")).unwrap());
        assert!(evaluator.evaluate(&ConditionExpr::exists("#a.zip")).unwrap());
    }

    #[test]
    fn test_custom_locator() {
        struct TopLevelOnly;

        impl FieldLocator for TopLevelOnly {
            fn locate<'d>(&self, document: &'d Document, path: &str) -> Option<&'d Value> {
                document.get(path)
            }
        }

        let doc = sample_doc();
        let placeholders = PlaceholderTable::new();
        let evaluator = ConditionEvaluator::new(&doc, &placeholders).with_locator(&TopLevelOnly);
        assert!(evaluator.evaluate(&ConditionExpr::exists("address")).unwrap());
        assert!(!evaluator
            .evaluate(&ConditionExpr::exists("address.city"))
            .unwrap());
    }

    #[test]
    fn test_evaluate_condition_without_document() {
        let placeholders = PlaceholderTable::new();
        let expr = ConditionExpr::not_exists("name");
        assert!(!evaluate_condition(&expr, None, &placeholders, None).unwrap());

        let doc = sample_doc();
        assert!(!evaluate_condition(&expr, Some(&doc), &placeholders, None).unwrap());
    }

    #[test]
    fn test_condition_to_predicate() {
        let placeholders = values(vec![(":min", Value::from(18))]);
        let mut aliases = AliasTable::new();
        aliases.insert("#age".to_string(), "age".to_string());
        let predicate = condition_to_predicate(
            ConditionExpr::ge(ConditionExpr::literal("#age"), ":min"),
            placeholders,
            aliases,
        );

        assert!(predicate(&sample_doc()).unwrap());

        let mut minor = Document::new();
        minor.insert("age".to_string(), Value::from(12));
        assert!(!predicate(&minor).unwrap());
        assert!(!predicate(&Document::new()).unwrap());
    }
}
