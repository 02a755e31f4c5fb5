//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use inflex::LocaleInflections;
use serde::Serialize;

/// Summary of one configured kind.
#[derive(Debug, Serialize)]
pub struct KindSummary {
    /// Kind name, without the strict `@` prefix.
    pub kind: String,
    pub strict: bool,
    /// Number of true tokens.
    pub tokens: usize,
    pub aliases: usize,
    pub default: Option<String>,
}

/// Summarize every kind of a locale, loose kinds first.
pub fn summarize(inflections: &LocaleInflections) -> Vec<KindSummary> {
    let loose = inflections.loose();
    let strict = inflections.strict();

    let loose_kinds = loose.kinds().map(|kind| KindSummary {
        kind: kind.to_string(),
        strict: false,
        tokens: loose.true_tokens(Some(kind)).count(),
        aliases: loose.aliases(Some(kind)).count(),
        default: loose.get_default(kind).map(str::to_string),
    });
    let strict_kinds = strict.kinds().map(|kind| KindSummary {
        kind: kind.to_string(),
        strict: true,
        tokens: strict.true_tokens(Some(kind)).count(),
        aliases: strict.aliases(Some(kind)).count(),
        default: strict.get_default(kind).map(str::to_string),
    });
    loose_kinds.chain(strict_kinds).collect()
}

/// Format kind summaries as a table.
pub fn format_kinds_table(kinds: &[KindSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Strict", "Tokens", "Aliases", "Default"]);

    for summary in kinds {
        table.add_row(vec![
            summary.kind.clone(),
            if summary.strict { "yes" } else { "no" }.to_string(),
            summary.tokens.to_string(),
            summary.aliases.to_string(),
            summary.default.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table
}
