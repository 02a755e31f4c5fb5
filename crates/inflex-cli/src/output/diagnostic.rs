//! Miette diagnostics for configuration files.

use std::path::Path;

use inflex::LoadError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for an unreadable or invalid configuration.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(inflex::config))]
pub struct ConfigDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl ConfigDiagnostic {
    /// Create a diagnostic from a JSON syntax or shape error.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        // serde_json reports 1-based lines and columns.
        let offset = content
            .lines()
            .take(err.line().saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + err.column().saturating_sub(1);
        let offset = offset.min(content.len());

        ConfigDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: Some((offset, 1).into()),
            message: format!("invalid configuration: {err}"),
            help: Some("expected an object of kinds, each an object of token: description".into()),
        }
    }

    /// Create a diagnostic from a validation error, pointing at the first
    /// mention of the offending name.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Self {
        let (name, help) = match err {
            LoadError::BadKind { kind, .. } => (
                kind.as_str(),
                "kind names must be non-empty, free of whitespace and of + | : ! @ { } , \\ ~, \
                 and must not be a reserved option key",
            ),
            LoadError::BadToken { token, .. } => (
                token.as_str(),
                "token names follow the kind name rules and `default` is reserved",
            ),
            LoadError::BadAlias { token, .. } => (
                token.as_str(),
                "pointers start with '@' and must lead to a token of the same kind",
            ),
            LoadError::DuplicatedToken { token, .. } => (
                token.as_str(),
                "loose kinds share one namespace; rename the token or make the kind strict with an '@' prefix",
            ),
        };

        ConfigDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: find_quoted(content, name),
            message: err.to_string(),
            help: Some(help.to_string()),
        }
    }
}

/// Span of the first `"name"` in the content, quotes included.
fn find_quoted(content: &str, name: &str) -> Option<SourceSpan> {
    let needle = format!("\"{name}\"");
    content
        .find(&needle)
        .map(|offset| (offset, needle.len()).into())
}
