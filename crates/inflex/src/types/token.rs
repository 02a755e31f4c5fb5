use std::fmt;

use serde::Serialize;

/// A named value inside a kind.
///
/// A true token carries its own description. An alias points at a true
/// token of the same kind and carries a copy of that token's description;
/// alias chains are flattened while loading, so `target` always names a
/// true token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    name: String,
    kind: String,
    description: String,
    target: Option<String>,
}

impl Token {
    pub(crate) fn new(name: &str, kind: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            description: description.to_string(),
            target: None,
        }
    }

    pub(crate) fn alias(name: &str, target: &Token) -> Self {
        Self {
            name: name.to_string(),
            kind: target.kind.clone(),
            description: target.description.clone(),
            target: Some(target.name.clone()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The true token this alias points at, or `None` for a true token.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_alias(&self) -> bool {
        self.target.is_some()
    }

    /// Name of the true token: the target for aliases, the name otherwise.
    pub fn true_name(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{}:{} -> {}", self.kind, self.name, target),
            None => write!(f, "{}:{}", self.kind, self.name),
        }
    }
}
