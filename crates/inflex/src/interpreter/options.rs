//! Engine-wide switches and per-call inflection options.

use std::collections::BTreeMap;

use bon::Builder;

use crate::interpreter::OptionsError;
use crate::syntax::MARKER;

/// Option key overriding [`Switches::raises`] for one call.
pub const RAISES_KEY: &str = "inflector_raises";
/// Option key overriding [`Switches::aliased_patterns`] for one call.
pub const ALIASED_PATTERNS_KEY: &str = "inflector_aliased_patterns";
/// Option key overriding [`Switches::unknown_defaults`] for one call.
pub const UNKNOWN_DEFAULTS_KEY: &str = "inflector_unknown_defaults";
/// Option key overriding [`Switches::excluded_defaults`] for one call.
pub const EXCLUDED_DEFAULTS_KEY: &str = "inflector_excluded_defaults";

/// Option keys that are never treated as kind names.
pub const RESERVED_KEYS: [&str; 4] = [
    RAISES_KEY,
    ALIASED_PATTERNS_KEY,
    UNKNOWN_DEFAULTS_KEY,
    EXCLUDED_DEFAULTS_KEY,
];

/// Check whether a name is one of the reserved option keys.
pub fn is_reserved_key(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Behavior switches of the interpolation engine.
///
/// The [`Inflector`](crate::Inflector) owns the engine-wide value; each call
/// may override individual switches through [`InflectionOptions`].
///
/// # Example
///
/// ```
/// use inflex::Switches;
///
/// let switches = Switches::builder().raises(true).build();
/// assert!(switches.raises);
/// assert!(switches.unknown_defaults);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct Switches {
    /// Return pattern errors instead of falling back to free text.
    #[builder(default)]
    pub raises: bool,

    /// Allow alias names as token references inside patterns.
    #[builder(default)]
    pub aliased_patterns: bool,

    /// Use the kind's default token when the option is missing or invalid.
    #[builder(default = true)]
    pub unknown_defaults: bool,

    /// Use the default token's value when a valid option names a token the
    /// pattern does not mention.
    #[builder(default)]
    pub excluded_defaults: bool,
}

impl Default for Switches {
    fn default() -> Self {
        Switches::builder().build()
    }
}

impl Switches {
    /// Apply the overrides carried by per-call options.
    pub fn merged(self, options: &InflectionOptions) -> Self {
        Self {
            raises: options.raises.unwrap_or(self.raises),
            aliased_patterns: options.aliased_patterns.unwrap_or(self.aliased_patterns),
            unknown_defaults: options.unknown_defaults.unwrap_or(self.unknown_defaults),
            excluded_defaults: options.excluded_defaults.unwrap_or(self.excluded_defaults),
        }
    }
}

/// Options for one interpolation call: requested token per kind plus
/// optional switch overrides.
///
/// For strict kinds, a key with the `@` prefix (`@gender`) takes precedence
/// over the plain kind name.
///
/// # Example
///
/// ```
/// use inflex::InflectionOptions;
///
/// let options = InflectionOptions::new()
///     .with("gender", "f")
///     .with_raises(true);
/// assert_eq!(options.get("gender"), Some("f"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InflectionOptions {
    kinds: BTreeMap<String, String>,
    pub(crate) raises: Option<bool>,
    pub(crate) aliased_patterns: Option<bool>,
    pub(crate) unknown_defaults: Option<bool>,
    pub(crate) excluded_defaults: Option<bool>,
}

impl InflectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a flat key/value map, the shape host translation
    /// layers usually pass around. Reserved keys become switch overrides.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut options = Self::new();
        for (key, value) in pairs {
            options.insert(key.into(), value.into())?;
        }
        Ok(options)
    }

    /// Insert one key/value pair, routing reserved keys to switch overrides.
    pub fn insert(&mut self, key: String, value: String) -> Result<(), OptionsError> {
        let slot = match key.as_str() {
            RAISES_KEY => &mut self.raises,
            ALIASED_PATTERNS_KEY => &mut self.aliased_patterns,
            UNKNOWN_DEFAULTS_KEY => &mut self.unknown_defaults,
            EXCLUDED_DEFAULTS_KEY => &mut self.excluded_defaults,
            _ => {
                self.kinds.insert(key, value);
                return Ok(());
            }
        };
        let flag = value
            .parse::<bool>()
            .map_err(|_| OptionsError::InvalidSwitch { key, value })?;
        *slot = Some(flag);
        Ok(())
    }

    /// Request a token for a kind.
    ///
    /// Reserved keys become switch overrides, as with [`Self::insert`]. A
    /// reserved key whose value is not `true` or `false` is ignored; use
    /// [`Self::from_pairs`] to get the error instead.
    pub fn with(mut self, kind: impl Into<String>, token: impl Into<String>) -> Self {
        if let Err(error) = self.insert(kind.into(), token.into()) {
            tracing::warn!(%error, "switch override ignored");
        }
        self
    }

    pub fn with_raises(mut self, raises: bool) -> Self {
        self.raises = Some(raises);
        self
    }

    pub fn with_aliased_patterns(mut self, aliased_patterns: bool) -> Self {
        self.aliased_patterns = Some(aliased_patterns);
        self
    }

    pub fn with_unknown_defaults(mut self, unknown_defaults: bool) -> Self {
        self.unknown_defaults = Some(unknown_defaults);
        self
    }

    pub fn with_excluded_defaults(mut self, excluded_defaults: bool) -> Self {
        self.excluded_defaults = Some(excluded_defaults);
        self
    }

    /// Get the raw value stored under a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.kinds.get(key).map(String::as_str)
    }

    /// Requested token for a kind, ignoring empty values.
    ///
    /// Strict kinds look up `@kind` first and fall back to `kind`.
    pub fn token_for(&self, kind: &str, strict: bool) -> Option<&str> {
        let prefixed = strict
            .then(|| self.get(&format!("{MARKER}{kind}")))
            .flatten()
            .filter(|token| !token.is_empty());
        prefixed.or_else(|| self.get(kind).filter(|token| !token.is_empty()))
    }

    /// Iterate over the kind/token pairs, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.kinds.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
