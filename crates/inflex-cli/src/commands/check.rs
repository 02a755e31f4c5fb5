//! Implementation of the `inflex check` command.

use std::path::{Path, PathBuf};

use clap::Args;
use inflex::lint_text;
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use super::config::{load_config, locale_for, read_config};
use crate::output::table::{format_kinds_table, summarize, KindSummary};

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Configuration files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Locale id for every file. Defaults to each file's stem
    #[arg(long)]
    pub locale: Option<String>,

    /// Pattern text to lint against each configuration
    #[arg(long)]
    pub text: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    kinds: Vec<KindSummary>,
    warnings: Vec<String>,
}

/// Run the check command.
///
/// Exits with `DATAERR` when any file fails to load or any lint warning is
/// found.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let locale = locale_for(path, args.locale.as_deref());
        let content = read_config(path)?;
        let mut report = FileReport {
            file: path.display().to_string(),
            locale,
            error: None,
            kinds: Vec::new(),
            warnings: Vec::new(),
        };

        match load_config(path, &content, &report.locale) {
            Ok(inflections) => {
                report.kinds = summarize(&inflections);
                if let Some(text) = &args.text {
                    report.warnings = lint_text(text, &inflections)
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                }
                if !args.json {
                    print_report(path, &report);
                }
            }
            Err(diagnostic) => {
                report.error = Some(diagnostic.to_string());
                if !args.json {
                    eprintln!("{:?}", Report::new(diagnostic));
                }
            }
        }
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    }

    let failed = reports
        .iter()
        .any(|report| report.error.is_some() || !report.warnings.is_empty());
    Ok(if failed { exitcode::DATAERR } else { exitcode::OK })
}

fn print_report(path: &Path, report: &FileReport) {
    println!(
        "{} {} (locale '{}')",
        "ok".if_supports_color(Stdout, |text| text.green()),
        path.display(),
        report.locale
    );
    if !report.kinds.is_empty() {
        println!("{}", format_kinds_table(&report.kinds));
    }
    for warning in &report.warnings {
        println!(
            "{}: {}",
            "warning".if_supports_color(Stdout, |text| text.yellow()),
            warning
        );
    }
}
