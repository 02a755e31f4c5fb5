//! The inflector: per-locale inflection registry and interpolation entry
//! point.

use std::collections::BTreeMap;
use std::sync::Arc;

use bon::Builder;
use parking_lot::RwLock;

use crate::interpreter::{
    InflectionOptions, LintWarning, LoadError, PatternError, RawInflections, Switches,
    interpolate_with, lint_text, load_inflections,
};
use crate::types::LocaleInflections;

/// Owns the inflection stores of every loaded locale and interpolates text
/// against them.
///
/// Each locale's data is an immutable [`LocaleInflections`] behind an `Arc`.
/// Loading a locale validates the whole tree first and then swaps the
/// pointer, so concurrent readers see either the old or the new store, never
/// a partial one, and a failed load leaves the installed store untouched.
///
/// # Example
///
/// ```
/// use inflex::{InflectionOptions, Inflector, RawInflections, Switches};
///
/// let inflector = Inflector::builder()
///     .switches(Switches::builder().raises(true).build())
///     .build();
/// let raw = RawInflections::new().kind("gender", [
///     ("m", "male"), ("f", "female"), ("default", "m"),
/// ]);
/// inflector.load_locale("en", &raw).unwrap();
///
/// let options = InflectionOptions::new().with("gender", "f");
/// let text = inflector.interpolate("@{f:She|m:He} left", "en", &options).unwrap();
/// assert_eq!(text, "She left");
/// ```
#[derive(Debug, Builder)]
pub struct Inflector {
    /// Engine-wide switches; calls may override them through options.
    #[builder(default, into)]
    switches: RwLock<Switches>,

    /// Per-locale stores, indexed by locale id.
    #[builder(skip)]
    locales: RwLock<BTreeMap<String, Arc<LocaleInflections>>>,
}

impl Default for Inflector {
    fn default() -> Self {
        Inflector::builder().build()
    }
}

impl Inflector {
    /// Create an inflector with default switches and no locales.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switches(&self) -> Switches {
        *self.switches.read()
    }

    /// Replace the engine-wide switches. Calls already running keep the
    /// switches they started with.
    pub fn set_switches(&self, switches: Switches) {
        *self.switches.write() = switches;
    }

    // =========================================================================
    // Locale Management
    // =========================================================================

    /// Validate `raw` and install it as the data for `locale`.
    ///
    /// Loading a locale again **replaces** its previous data. Returns the
    /// number of tokens loaded.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoadError`] found. The previously installed data
    /// for the locale, if any, stays in place.
    pub fn load_locale(&self, locale: &str, raw: &RawInflections) -> Result<usize, LoadError> {
        let inflections = load_inflections(locale, raw)?;
        let count = inflections.token_count();
        self.install(inflections);
        Ok(count)
    }

    /// Install already built data, returning the data it replaced.
    pub fn install(&self, inflections: LocaleInflections) -> Option<Arc<LocaleInflections>> {
        let locale = inflections.locale().to_string();
        self.locales.write().insert(locale, Arc::new(inflections))
    }

    /// Drop a locale's data. Returns whether the locale was loaded.
    pub fn unload_locale(&self, locale: &str) -> bool {
        self.locales.write().remove(locale).is_some()
    }

    /// Snapshot of a locale's data; it stays valid across later reloads.
    pub fn inflections(&self, locale: &str) -> Option<Arc<LocaleInflections>> {
        self.locales.read().get(locale).cloned()
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.read().contains_key(locale)
    }

    /// Loaded locale ids, sorted.
    pub fn locales(&self) -> Vec<String> {
        self.locales.read().keys().cloned().collect()
    }

    // =========================================================================
    // Interpolation
    // =========================================================================

    /// Interpolate every inflection pattern in `text` for `locale`.
    ///
    /// A locale with no loaded data behaves as an empty store: every pattern
    /// falls back to its free text.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] only when the effective `raises` switch is
    /// on.
    pub fn interpolate(&self, text: &str, locale: &str, options: &InflectionOptions) -> Result<String, PatternError> {
        let inflections = self.snapshot(locale);
        interpolate_with(text, &inflections, self.switches(), options)
    }

    /// Run the lint rules over `text` for `locale`.
    pub fn lint(&self, text: &str, locale: &str) -> Vec<LintWarning> {
        lint_text(text, &self.snapshot(locale))
    }

    fn snapshot(&self, locale: &str) -> Arc<LocaleInflections> {
        self.inflections(locale).unwrap_or_else(|| {
            tracing::debug!(locale, "no inflections loaded for locale");
            Arc::new(LocaleInflections::new(locale))
        })
    }
}
