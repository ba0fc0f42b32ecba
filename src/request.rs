//! JSON evaluation requests.
//!
//! A request bundles everything one evaluation needs, so a condition can be
//! checked from a file without an embedding application:
//!
//! ```json
//! {
//!   "condition": {"Exists": {"field": "#n"}},
//!   "document": {"name": {"S": "x"}},
//!   "values": {},
//!   "aliases": {"#n": "name"}
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::expression::{
    AliasTable, ConditionEvaluator, ConditionExpr, ConditionResult, EvaluatorConfig,
    PlaceholderTable,
};

/// A condition together with its document, placeholders and aliases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Parsed condition expression tree
    pub condition: ConditionExpr,
    /// Document to evaluate against; absent evaluates to false
    #[serde(default)]
    pub document: Option<Document>,
    /// Placeholder values
    #[serde(default)]
    pub values: PlaceholderTable,
    /// Field name aliases
    #[serde(default)]
    pub aliases: Option<AliasTable>,
    /// Evaluator settings
    #[serde(default)]
    pub config: EvaluatorConfig,
}

impl EvaluationRequest {
    /// Parse a request from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse evaluation request")
    }

    /// Load a request from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Evaluate the request's condition
    pub fn evaluate(&self) -> ConditionResult<bool> {
        let document = match &self.document {
            Some(document) => document,
            None => {
                log::warn!(
                    "request has no document, condition {} evaluates to false",
                    self.condition
                );
                return Ok(false);
            }
        };

        let evaluator =
            ConditionEvaluator::new(document, &self.values).with_config(self.config);
        match &self.aliases {
            Some(aliases) => evaluator.with_aliases(aliases).evaluate(&self.condition),
            None => evaluator.evaluate(&self.condition),
        }
    }
}
