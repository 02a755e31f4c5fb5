//! Reading configuration files into validated inflection stores.

use std::fs::read_to_string;
use std::path::Path;

use inflex::{load_inflections, LocaleInflections, RawInflections};
use miette::{miette, Result};

use crate::output::ConfigDiagnostic;

/// Locale id for a configuration file: the explicit value, or the file stem
/// (`locales/en.json` is `en`).
pub fn locale_for(path: &Path, locale: Option<&str>) -> String {
    match locale {
        Some(locale) => locale.to_string(),
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

pub fn read_config(path: &Path) -> Result<String> {
    read_to_string(path)
        .map_err(|e| miette!("Cannot read configuration file {}: {}", path.display(), e))
}

/// Parse JSON content and validate it as the data of `locale`.
pub fn load_config(
    path: &Path,
    content: &str,
    locale: &str,
) -> Result<LocaleInflections, ConfigDiagnostic> {
    tracing::debug!(path = %path.display(), locale, "reading inflection configuration");
    let raw: RawInflections = serde_json::from_str(content)
        .map_err(|e| ConfigDiagnostic::from_json_error(path, content, &e))?;
    let inflections = load_inflections(locale, &raw)
        .map_err(|e| ConfigDiagnostic::from_load_error(path, content, &e))?;
    tracing::info!(
        path = %path.display(),
        locale,
        kinds = raw.len(),
        tokens = inflections.token_count(),
        "configuration loaded"
    );
    Ok(inflections)
}
