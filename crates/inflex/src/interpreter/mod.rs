//! Inflection interpreter.
//!
//! Loads raw configuration into validated stores, resolves patterns against
//! them and owns the per-locale registry.

mod engine;
mod error;
mod inflector;
mod lint;
mod loader;
mod options;

pub use engine::interpolate_with;
pub use error::{LintWarning, LoadError, OptionsError, PatternError};
pub use inflector::Inflector;
pub use lint::lint_text;
pub use loader::{RawInflections, RawKind, load_inflections};
pub use options::{
    ALIASED_PATTERNS_KEY, EXCLUDED_DEFAULTS_KEY, InflectionOptions, RAISES_KEY, RESERVED_KEYS,
    Switches, UNKNOWN_DEFAULTS_KEY, is_reserved_key,
};
