//! Conversion of a raw configuration tree into validated inflection stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::interpreter::LoadError;
use crate::interpreter::options::is_reserved_key;
use crate::syntax::{DEFAULT_TOKEN, MARKER, MAX_ALIAS_HOPS, is_valid_name};
use crate::types::LocaleInflections;

/// Tokens of one kind as found in configuration: token name to description,
/// or to an alias pointer (`"@other_token"`). `None` models a null entry.
pub type RawKind = BTreeMap<String, Option<String>>;

/// A locale's inflection configuration: kind name to its tokens.
///
/// Kind names prefixed with `@` are strict kinds. The reserved token name
/// `default` names the kind's default token, directly or through a pointer.
///
/// ```json
/// {
///   "gender": { "m": "male", "f": "female", "n": "neuter", "default": "n" },
///   "@tense": { "past": "past tense", "now": "present tense", "p": "@past" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInflections(BTreeMap<String, RawKind>);

impl RawInflections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a kind with its token entries, replacing a kind of the same name.
    pub fn kind<'a>(mut self, kind: &str, entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let tokens = entries
            .into_iter()
            .map(|(token, value)| (token.to_string(), Some(value.to_string())))
            .collect();
        self.0.insert(kind.to_string(), tokens);
        self
    }

    /// Insert a kind with raw (possibly null) entries.
    pub fn insert(&mut self, kind: impl Into<String>, tokens: RawKind) {
        self.0.insert(kind.into(), tokens);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawKind)> {
        self.0.iter().map(|(kind, tokens)| (kind.as_str(), tokens))
    }

    /// Number of configured kinds.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, RawKind)> for RawInflections {
    fn from_iter<T: IntoIterator<Item = (String, RawKind)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which store a configured kind lives in.
#[derive(Debug, Clone, Copy)]
struct KindEntry<'a> {
    name: &'a str,
    strict: bool,
    tokens: &'a RawKind,
}

/// Validate a raw tree and build the stores for a locale.
///
/// Runs three passes: true tokens, then aliases, then defaults. The first
/// error aborts the load.
///
/// # Errors
///
/// - [`LoadError::BadKind`] for invalid or reserved kind names
/// - [`LoadError::BadToken`] for invalid token names or null descriptions
/// - [`LoadError::DuplicatedToken`] for token names reused across loose kinds
/// - [`LoadError::BadAlias`] for dangling, cyclic or empty alias and default pointers
pub fn load_inflections(locale: &str, raw: &RawInflections) -> Result<LocaleInflections, LoadError> {
    let mut inflections = LocaleInflections::new(locale);
    let kinds = raw
        .iter()
        .map(|(kind, tokens)| kind_entry(locale, kind, tokens))
        .collect::<Result<Vec<_>, _>>()?;

    for entry in &kinds {
        for (token, value) in entry.tokens {
            if token == DEFAULT_TOKEN {
                continue;
            }
            let Some(description) = value else {
                return Err(LoadError::BadToken {
                    locale: locale.to_string(),
                    kind: entry.name.to_string(),
                    token: token.clone(),
                    reason: "missing description",
                });
            };
            if description.starts_with(MARKER) {
                continue;
            }
            if entry.strict {
                inflections
                    .strict_mut()
                    .add_token(token, entry.name, description)?;
            } else {
                inflections
                    .loose_mut()
                    .add_token(token, entry.name, description)?;
            }
        }
    }

    for entry in &kinds {
        for (token, value) in entry.tokens {
            let Some(pointer) = value.as_deref().filter(|v| v.starts_with(MARKER)) else {
                continue;
            };
            if token == DEFAULT_TOKEN {
                continue;
            }
            let target = resolve_pointer(locale, entry, token, pointer)?;
            if entry.strict {
                inflections.strict_mut().add_alias(token, &target, entry.name)?;
            } else {
                inflections
                    .loose_mut()
                    .add_alias(token, &target, Some(entry.name))?;
            }
        }
    }

    for entry in &kinds {
        let Some(value) = entry.tokens.get(DEFAULT_TOKEN) else {
            continue;
        };
        let Some(pointer) = value.as_deref() else {
            return Err(bad_alias(locale, entry, DEFAULT_TOKEN, "", "missing default"));
        };
        let target = resolve_pointer(locale, entry, DEFAULT_TOKEN, pointer)?;
        if entry.strict {
            inflections.strict_mut().set_default(entry.name, &target)?;
        } else {
            inflections.loose_mut().set_default(entry.name, &target)?;
        }
    }

    tracing::debug!(
        locale,
        kinds = kinds.len(),
        tokens = inflections.token_count(),
        "loaded inflections"
    );
    Ok(inflections)
}

/// Split the `@` prefix off a configured kind name and validate it.
fn kind_entry<'a>(locale: &str, kind: &'a str, tokens: &'a RawKind) -> Result<KindEntry<'a>, LoadError> {
    let (name, strict) = match kind.strip_prefix(MARKER) {
        Some(name) => (name, true),
        None => (kind, false),
    };
    if !is_valid_name(name) || is_reserved_key(name) {
        return Err(LoadError::BadKind {
            locale: locale.to_string(),
            kind: kind.to_string(),
        });
    }
    Ok(KindEntry { name, strict, tokens })
}

/// Follow a chain of pointers inside one kind until a true token is reached.
///
/// `pointer` is either `@name` or, for defaults, a bare token name.
fn resolve_pointer(locale: &str, entry: &KindEntry<'_>, token: &str, pointer: &str) -> Result<String, LoadError> {
    let mut current = pointer;
    for _ in 0..MAX_ALIAS_HOPS {
        let target = current.strip_prefix(MARKER).unwrap_or(current);
        if !is_valid_name(target) || target == DEFAULT_TOKEN {
            return Err(bad_alias(locale, entry, token, pointer, "invalid pointer"));
        }
        match entry.tokens.get(target) {
            Some(Some(next)) if next.starts_with(MARKER) => current = next.as_str(),
            Some(Some(_)) => return Ok(target.to_string()),
            _ => return Err(bad_alias(locale, entry, token, pointer, "pointer leads nowhere")),
        }
    }
    Err(bad_alias(locale, entry, token, pointer, "alias chain is too long or cyclic"))
}

fn bad_alias(locale: &str, entry: &KindEntry<'_>, token: &str, target: &str, reason: &'static str) -> LoadError {
    LoadError::BadAlias {
        locale: locale.to_string(),
        kind: entry.name.to_string(),
        token: token.to_string(),
        target: target.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tokens: &RawKind) -> KindEntry<'_> {
        KindEntry {
            name: "gender",
            strict: false,
            tokens,
        }
    }

    fn raw_kind(entries: &[(&str, &str)]) -> RawKind {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), Some((*v).to_string())))
            .collect()
    }

    #[test]
    fn resolve_pointer_follows_chain() {
        let tokens = raw_kind(&[("f", "female"), ("a", "@f"), ("b", "@a")]);
        let target = resolve_pointer("xx", &entry(&tokens), "b", "@a").unwrap();
        assert_eq!(target, "f");
    }

    #[test]
    fn resolve_pointer_accepts_bare_default() {
        let tokens = raw_kind(&[("n", "neuter")]);
        let target = resolve_pointer("xx", &entry(&tokens), DEFAULT_TOKEN, "n").unwrap();
        assert_eq!(target, "n");
    }

    #[test]
    fn resolve_pointer_detects_cycle() {
        let tokens = raw_kind(&[("a", "@b"), ("b", "@a")]);
        let err = resolve_pointer("xx", &entry(&tokens), "a", "@b").unwrap_err();
        assert!(matches!(
            err,
            LoadError::BadAlias {
                reason: "alias chain is too long or cyclic",
                ..
            }
        ));
    }

    #[test]
    fn kind_entry_strips_strict_marker() {
        let tokens = RawKind::new();
        let entry = kind_entry("xx", "@gender", &tokens).unwrap();
        assert_eq!(entry.name, "gender");
        assert!(entry.strict);
    }

    #[test]
    fn kind_entry_rejects_reserved_option_key() {
        let tokens = RawKind::new();
        let err = kind_entry("xx", "inflector_raises", &tokens).unwrap_err();
        assert!(matches!(err, LoadError::BadKind { .. }));
    }
}
