use crate::types::{LooseStore, StrictStore};

/// All inflection data of one locale: the loose store and the strict store.
///
/// Built once by the loader and read-only afterwards. A reload builds a new
/// value and replaces the old one wholesale.
#[derive(Debug, Clone, Default)]
pub struct LocaleInflections {
    locale: String,
    loose: LooseStore,
    strict: StrictStore,
}

impl LocaleInflections {
    /// Create empty stores for a locale.
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            loose: LooseStore::new(locale.clone()),
            strict: StrictStore::new(locale.clone()),
            locale,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Kinds used by loose patterns (`@{...}`).
    pub fn loose(&self) -> &LooseStore {
        &self.loose
    }

    /// Kinds used by named and complex patterns (`@gender{...}`).
    pub fn strict(&self) -> &StrictStore {
        &self.strict
    }

    pub fn loose_mut(&mut self) -> &mut LooseStore {
        &mut self.loose
    }

    pub fn strict_mut(&mut self) -> &mut StrictStore {
        &mut self.strict
    }

    /// Every kind name of the locale; strict kinds carry their `@` prefix.
    pub fn kinds(&self) -> Vec<String> {
        self.loose
            .kinds()
            .map(str::to_string)
            .chain(self.strict.kinds().map(|kind| format!("@{kind}")))
            .collect()
    }

    /// Total number of tokens and aliases in both stores.
    pub fn token_count(&self) -> usize {
        self.loose.len() + self.strict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loose.is_empty() && self.strict.is_empty()
    }
}
