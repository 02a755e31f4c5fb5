//! Error types for loading inflection data and interpolating patterns.

use thiserror::Error;

/// Errors that occur while loading a locale's inflection data.
///
/// These are never suppressed: a store that failed validation is discarded
/// and the previously installed one (if any) stays in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Kind name is empty, contains reserved characters or collides with a
    /// reserved option key.
    #[error("bad inflection kind '{kind}' in locale '{locale}'")]
    BadKind { locale: String, kind: String },

    /// Token name is invalid or its description is missing.
    #[error("bad inflection token '{token}' of kind '{kind}' in locale '{locale}': {reason}")]
    BadToken {
        locale: String,
        kind: String,
        token: String,
        reason: &'static str,
    },

    /// Alias or default pointer that does not lead to a true token.
    #[error("bad alias '{token}' -> '{target}' of kind '{kind}' in locale '{locale}': {reason}")]
    BadAlias {
        locale: String,
        kind: String,
        token: String,
        target: String,
        reason: &'static str,
    },

    /// Token name registered twice in one namespace.
    #[error(
        "duplicated inflection token '{token}' in locale '{locale}': kind '{kind}' redefines it from kind '{original_kind}'"
    )]
    DuplicatedToken {
        locale: String,
        token: String,
        kind: String,
        original_kind: String,
    },
}

/// An error found in a pattern during interpolation.
///
/// Only returned when the `raises` switch is active; otherwise the engine
/// treats the condition as "no match" and falls back to free text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Malformed or unknown token reference.
    #[error("invalid inflection token '{token}' in pattern '{pattern}'")]
    InvalidToken { pattern: String, token: String },

    /// Token of a different kind than the one fixed by the pattern's first token.
    #[error(
        "misplaced inflection token '{token}' of kind '{kind}' in pattern '{pattern}', expected kind '{expected}'"
    )]
    MisplacedToken {
        pattern: String,
        token: String,
        kind: String,
        expected: String,
    },

    /// Unknown or malformed kind segment of a named pattern.
    #[error("invalid inflection kind '{kind}' in pattern '{pattern}'")]
    InvalidKind { pattern: String, kind: String },

    /// No option supplied for the pattern's kind.
    #[error("no option given for inflection kind '{kind}' in pattern '{pattern}'")]
    OptionNotFound { pattern: String, kind: String },

    /// Option supplied but it names no token of the pattern's kind.
    #[error("option '{option}' is not a token of kind '{kind}' in pattern '{pattern}'")]
    OptionIncorrect {
        pattern: String,
        kind: String,
        option: String,
    },

    /// Token set arity differs from the number of kinds a complex pattern declares.
    #[error(
        "complex pattern '{pattern}' declares {expected} kinds but token set '{tokens}' has {got}"
    )]
    ComplexPatternMalformed {
        pattern: String,
        tokens: String,
        expected: usize,
        got: usize,
    },
}

/// An error in a flat option map handed to [`InflectionOptions::from_pairs`].
///
/// [`InflectionOptions::from_pairs`]: crate::InflectionOptions::from_pairs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Reserved switch key whose value is not `true` or `false`.
    #[error("switch '{key}' expects true or false, got '{value}'")]
    InvalidSwitch { key: String, value: String },
}

/// Warnings produced by static checks of pattern text against a locale.
///
/// Unlike [`PatternError`], warnings do not depend on the options of a call:
/// they flag patterns that are wrong or suspicious for every option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// Named, complex or malformed kind segment that the locale lacks.
    #[error("unknown inflection kind '{kind}' in pattern '{pattern}'")]
    UnknownKind { pattern: String, kind: String },

    /// Member that names no token of the pattern's store.
    #[error("unknown inflection token '{token}' in pattern '{pattern}'")]
    UnknownToken { pattern: String, token: String },

    /// Alias used where only true tokens match unless aliased patterns are on.
    #[error("alias '{token}' of '{target}' used in pattern '{pattern}'")]
    AliasInPattern {
        pattern: String,
        token: String,
        target: String,
    },

    #[error("token '{token}' of kind '{kind}' in pattern '{pattern}' expects kind '{expected}'")]
    MisplacedToken {
        pattern: String,
        token: String,
        kind: String,
        expected: String,
    },

    #[error("token set '{tokens}' in pattern '{pattern}' has {got} groups, expected {expected}")]
    ComplexArity {
        pattern: String,
        tokens: String,
        expected: usize,
        got: usize,
    },

    /// Token listed in more than one clause; later clauses never match it.
    #[error("token '{token}' appears in more than one clause of pattern '{pattern}'")]
    RepeatedToken { pattern: String, token: String },

    /// No free text, no negated member and no clause for the kind's default.
    #[error("pattern '{pattern}' has no free text and no clause for the default of kind '{kind}'")]
    MayRenderEmpty { pattern: String, kind: String },
}
