//! Field name alias substitution.
//!
//! Alias tokens (e.g. `#n0`) stand in for real field names inside an
//! expression. Substitution is plain string replacement with no escaping, and
//! it runs longest token first so that `#ab` is replaced before `#a` can match
//! inside it.

use std::collections::BTreeMap;

/// Alias token to actual field name
pub type AliasTable = BTreeMap<String, String>;

/// Order alias tokens by descending length
///
/// Tokens of equal length keep the table's key order.
pub fn sort_alias_tokens(aliases: &AliasTable) -> Vec<&str> {
    let mut tokens: Vec<&str> = aliases.keys().map(String::as_str).collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()));
    tokens
}

/// Replace every alias token found in `field_key` with its field name
///
/// `sorted_tokens` must come from [`sort_alias_tokens`] on the same table.
pub fn replace_alias_tokens(
    field_key: &str,
    aliases: &AliasTable,
    sorted_tokens: &[&str],
) -> String {
    let mut resolved = field_key.to_string();
    for token in sorted_tokens {
        if !resolved.contains(token) {
            continue;
        }
        if let Some(actual) = aliases.get(*token) {
            resolved = resolved.replace(token, actual);
        }
    }
    resolved
}

/// Resolves alias tokens for one evaluation
#[derive(Debug, Clone)]
pub struct AliasResolver<'a> {
    aliases: Option<&'a AliasTable>,
    sorted_tokens: Vec<&'a str>,
}

impl<'a> AliasResolver<'a> {
    /// Create a resolver over `aliases`, sorting its tokens once
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self {
            aliases: Some(aliases),
            sorted_tokens: sort_alias_tokens(aliases),
        }
    }

    /// Create a resolver that leaves field names unchanged
    pub fn empty() -> Self {
        Self {
            aliases: None,
            sorted_tokens: Vec::new(),
        }
    }

    /// Rewrite `field_key` to the actual field name
    pub fn resolve(&self, field_key: &str) -> String {
        match self.aliases {
            Some(aliases) if !aliases.is_empty() => {
                replace_alias_tokens(field_key, aliases, &self.sorted_tokens)
            }
            _ => field_key.to_string(),
        }
    }
}

impl Default for AliasResolver<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
