pub mod interpreter;
pub mod parser;
pub mod syntax;
pub mod types;

pub use interpreter::{
    InflectionOptions, Inflector, LintWarning, LoadError, OptionsError, PatternError,
    RawInflections, RawKind, Switches, interpolate_with, lint_text, load_inflections,
};
pub use types::{LocaleInflections, LooseStore, StrictStore, Token};

/// Builds an [`InflectionOptions`] from `kind => token` pairs.
///
/// Reserved `inflector_*` keys override switches for the call.
///
/// # Example
///
/// ```
/// use inflex::options;
///
/// let options = options! { "gender" => "f", "@tense" => "past" };
/// assert_eq!(options.get("gender"), Some("f"));
/// assert_eq!(options.get("@tense"), Some("past"));
///
/// let raising = options! { "inflector_raises" => "true" };
/// assert!(raising.is_empty());
/// ```
#[macro_export]
macro_rules! options {
    {} => {
        $crate::InflectionOptions::new()
    };
    { $($kind:expr => $token:expr),+ $(,)? } => {
        $crate::InflectionOptions::new()$(.with($kind, $token))+
    };
}
