//! Store for loose kinds, where token names are unique across the locale.

use std::collections::BTreeMap;

use crate::interpreter::LoadError;
use crate::syntax::{DEFAULT_TOKEN, is_valid_name};
use crate::types::Token;

/// Tokens of all loose kinds of one locale.
///
/// Token names share a single namespace, so a loose pattern can infer its
/// kind from any token it mentions. Reads never fail: unknown names yield
/// `None` or an empty iterator.
#[derive(Debug, Clone, Default)]
pub struct LooseStore {
    locale: String,
    /// All tokens and aliases, indexed by name.
    tokens: BTreeMap<String, Token>,
    /// Default true token per kind. Every kind with tokens has an entry in
    /// `kinds`, with or without a default.
    kinds: BTreeMap<String, Option<String>>,
}

impl LooseStore {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a true token.
    pub fn add_token(&mut self, name: &str, kind: &str, description: &str) -> Result<(), LoadError> {
        self.check_new_name(name, kind)?;
        self.kinds.entry(kind.to_string()).or_default();
        self.tokens
            .insert(name.to_string(), Token::new(name, kind, description));
        Ok(())
    }

    /// Register an alias of an existing token.
    ///
    /// When `kind` is given the target must belong to it. An alias of an
    /// alias is stored pointing straight at the true token.
    pub fn add_alias(&mut self, name: &str, target: &str, kind: Option<&str>) -> Result<(), LoadError> {
        let Some(target_token) = self.token(target, kind) else {
            return Err(LoadError::BadAlias {
                locale: self.locale.clone(),
                kind: kind.unwrap_or_default().to_string(),
                token: name.to_string(),
                target: target.to_string(),
                reason: "target is not a token of this kind",
            });
        };
        let true_token = self
            .tokens
            .get(target_token.true_name())
            .unwrap_or(target_token);
        let alias = Token::alias(name, true_token);
        self.check_new_name(name, alias.kind())?;
        self.tokens.insert(name.to_string(), alias);
        Ok(())
    }

    /// Set the default token of a kind, replacing any previous default.
    pub fn set_default(&mut self, kind: &str, token: &str) -> Result<(), LoadError> {
        let Some(true_token) = self.get_true_token(token, Some(kind)).map(str::to_string) else {
            return Err(LoadError::BadAlias {
                locale: self.locale.clone(),
                kind: kind.to_string(),
                token: DEFAULT_TOKEN.to_string(),
                target: token.to_string(),
                reason: "default is not a token of this kind",
            });
        };
        self.kinds.insert(kind.to_string(), Some(true_token));
        Ok(())
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
        if let Some(existing) = self.tokens.get(name) {
            return Err(LoadError::DuplicatedToken {
                locale: self.locale.clone(),
                token: name.to_string(),
                kind: kind.to_string(),
                original_kind: existing.kind().to_string(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get a token or alias, optionally restricted to a kind.
    pub fn token(&self, name: &str, kind: Option<&str>) -> Option<&Token> {
        self.tokens
            .get(name)
            .filter(|token| kind.is_none_or(|kind| token.kind() == kind))
    }

    /// Get the kind a token or alias belongs to.
    pub fn get_kind(&self, token: &str, kind: Option<&str>) -> Option<&str> {
        self.token(token, kind).map(Token::kind)
    }

    /// Resolve a token or alias to the name of its true token.
    pub fn get_true_token(&self, token: &str, kind: Option<&str>) -> Option<&str> {
        self.token(token, kind).map(Token::true_name)
    }

    pub fn get_description(&self, token: &str, kind: Option<&str>) -> Option<&str> {
        self.token(token, kind).map(Token::description)
    }

    /// Get the true token an alias points at. `None` for true tokens.
    pub fn get_target(&self, alias: &str, kind: Option<&str>) -> Option<&str> {
        self.token(alias, kind).and_then(Token::target)
    }

    pub fn get_default(&self, kind: &str) -> Option<&str> {
        self.kinds.get(kind).and_then(Option::as_deref)
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn has_token(&self, token: &str, kind: Option<&str>) -> bool {
        self.token(token, kind).is_some()
    }

    pub fn has_true_token(&self, token: &str, kind: Option<&str>) -> bool {
        self.token(token, kind).is_some_and(|t| !t.is_alias())
    }

    pub fn has_alias(&self, token: &str, kind: Option<&str>) -> bool {
        self.token(token, kind).is_some_and(Token::is_alias)
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// All tokens and aliases in name order, optionally of one kind.
    pub fn tokens<'a>(&'a self, kind: Option<&'a str>) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens
            .values()
            .filter(move |token| kind.is_none_or(|kind| token.kind() == kind))
    }

    pub fn true_tokens<'a>(&'a self, kind: Option<&'a str>) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens(kind).filter(|token| !token.is_alias())
    }

    pub fn aliases<'a>(&'a self, kind: Option<&'a str>) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens(kind).filter(|token| token.is_alias())
    }

    /// Names of all kinds in this store, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
