//! Implementation of the `inflex eval` command.

use std::path::PathBuf;

use clap::Args;
use inflex::{InflectionOptions, Inflector};
use miette::{miette, IntoDiagnostic, Report, Result};
use serde::Serialize;

use super::config::{load_config, locale_for, read_config};

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Configuration file (.json)
    #[arg(long, required = true)]
    pub config: PathBuf,

    /// Locale id. Defaults to the configuration file's stem
    #[arg(long)]
    pub locale: Option<String>,

    /// Text with inflection patterns to interpolate
    #[arg(long, required = true)]
    pub text: String,

    /// Options in kind=token format (repeatable); `inflector_*` keys
    /// override switches
    #[arg(short = 'o', long = "option", value_parser = parse_key_val)]
    pub options: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub locale: String,
    pub result: String,
}

/// Parse a key=value option string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid option format '{s}': expected kind=token"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let locale = locale_for(&args.config, args.locale.as_deref());
    let content = read_config(&args.config)?;
    let inflections = match load_config(&args.config, &content, &locale) {
        Ok(inflections) => inflections,
        Err(diagnostic) => {
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };

    let inflector = Inflector::new();
    inflector.install(inflections);
    let options = InflectionOptions::from_pairs(args.options)
        .map_err(|e| miette!("Invalid option: {}", e))?;

    match inflector.interpolate(&args.text, &locale, &options) {
        Ok(result) => {
            if args.json {
                let output = EvalResult { locale, result };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({ "error": e.to_string() });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Interpolation error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}
