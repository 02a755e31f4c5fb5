//! Store for strict kinds, where tokens are namespaced per kind.

use std::collections::BTreeMap;

use crate::interpreter::LoadError;
use crate::syntax::{DEFAULT_TOKEN, is_valid_name};
use crate::types::Token;

/// Tokens of one strict kind.
#[derive(Debug, Clone, Default)]
struct KindTokens {
    tokens: BTreeMap<String, Token>,
    default: Option<String>,
}

/// Tokens of all strict (named) kinds of one locale.
///
/// Indexed by `(kind, token)`: the same token name may exist independently
/// under different kinds. Named and complex patterns read from this store.
#[derive(Debug, Clone, Default)]
pub struct StrictStore {
    locale: String,
    kinds: BTreeMap<String, KindTokens>,
}

impl StrictStore {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            kinds: BTreeMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a true token under a kind.
    pub fn add_token(&mut self, name: &str, kind: &str, description: &str) -> Result<(), LoadError> {
        self.check_new_name(name, kind)?;
        self.kinds
            .entry(kind.to_string())
            .or_default()
            .tokens
            .insert(name.to_string(), Token::new(name, kind, description));
        Ok(())
    }

    /// Register an alias of an existing token of the same kind.
    pub fn add_alias(&mut self, name: &str, target: &str, kind: &str) -> Result<(), LoadError> {
        let Some(target_token) = self.token(target, kind) else {
            return Err(LoadError::BadAlias {
                locale: self.locale.clone(),
                kind: kind.to_string(),
                token: name.to_string(),
                target: target.to_string(),
                reason: "target is not a token of this kind",
            });
        };
        let true_token = self
            .token(target_token.true_name(), kind)
            .unwrap_or(target_token);
        let alias = Token::alias(name, true_token);
        self.check_new_name(name, kind)?;
        self.kinds
            .entry(kind.to_string())
            .or_default()
            .tokens
            .insert(name.to_string(), alias);
        Ok(())
    }

    /// Set the default token of a kind, replacing any previous default.
    pub fn set_default(&mut self, kind: &str, token: &str) -> Result<(), LoadError> {
        let true_token = self.get_true_token(token, kind).map(str::to_string);
        match (self.kinds.get_mut(kind), true_token) {
            (Some(entry), Some(true_token)) => {
                entry.default = Some(true_token);
                Ok(())
            }
            _ => Err(LoadError::BadAlias {
                locale: self.locale.clone(),
                kind: kind.to_string(),
                token: DEFAULT_TOKEN.to_string(),
                target: token.to_string(),
                reason: "default is not a token of this kind",
            }),
        }
    }

    fn check_new_name(&self, name: &str, kind: &str) -> Result<(), LoadError> {
        if !is_valid_name(kind) {
            return Err(LoadError::BadKind {
                locale: self.locale.clone(),
                kind: kind.to_string(),
            });
        }
        if !is_valid_name(name) || name == DEFAULT_TOKEN {
            return Err(LoadError::BadToken {
                locale: self.locale.clone(),
                kind: kind.to_string(),
                token: name.to_string(),
                reason: "name is empty, reserved or contains reserved characters",
            });
        }
        if self.has_token(name, kind) {
            return Err(LoadError::DuplicatedToken {
                locale: self.locale.clone(),
                token: name.to_string(),
                kind: kind.to_string(),
                original_kind: kind.to_string(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn token(&self, name: &str, kind: &str) -> Option<&Token> {
        self.kinds.get(kind).and_then(|entry| entry.tokens.get(name))
    }

    /// Returns `kind` back when the token exists in it.
    pub fn get_kind(&self, token: &str, kind: &str) -> Option<&str> {
        self.token(token, kind).map(Token::kind)
    }

    pub fn get_true_token(&self, token: &str, kind: &str) -> Option<&str> {
        self.token(token, kind).map(Token::true_name)
    }

    pub fn get_description(&self, token: &str, kind: &str) -> Option<&str> {
        self.token(token, kind).map(Token::description)
    }

    pub fn get_target(&self, alias: &str, kind: &str) -> Option<&str> {
        self.token(alias, kind).and_then(Token::target)
    }

    pub fn get_default(&self, kind: &str) -> Option<&str> {
        self.kinds.get(kind).and_then(|entry| entry.default.as_deref())
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn has_token(&self, token: &str, kind: &str) -> bool {
        self.token(token, kind).is_some()
    }

    pub fn has_true_token(&self, token: &str, kind: &str) -> bool {
        self.token(token, kind).is_some_and(|t| !t.is_alias())
    }

    pub fn has_alias(&self, token: &str, kind: &str) -> bool {
        self.token(token, kind).is_some_and(Token::is_alias)
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// All tokens and aliases ordered by kind then name, optionally of one kind.
    pub fn tokens<'a>(&'a self, kind: Option<&'a str>) -> impl Iterator<Item = &'a Token> + 'a {
        self.kinds
            .iter()
            .filter(move |(name, _)| kind.is_none_or(|kind| name.as_str() == kind))
            .flat_map(|(_, entry)| entry.tokens.values())
    }

    pub fn true_tokens<'a>(&'a self, kind: Option<&'a str>) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens(kind).filter(|token| !token.is_alias())
    }

    pub fn aliases<'a>(&'a self, kind: Option<&'a str>) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens(kind).filter(|token| token.is_alias())
    }

    /// Names of all strict kinds, sorted, without the `@` prefix.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.kinds.values().map(|entry| entry.tokens.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
