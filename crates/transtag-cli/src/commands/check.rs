//! Implementation of the `transtag check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Report, miette};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;
use transtag::parse_template;

use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct CheckResult {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut results = Vec::new();

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read template {}: {e}", path.display()))?;

        let result = match parse_template(&content) {
            Ok(template) => {
                debug!(file = %path.display(), nodes = template.nodes.len(), "template parsed");
                if !args.json {
                    println!("{} {}", "ok".green(), path.display());
                }
                CheckResult {
                    file: path.display().to_string(),
                    ok: true,
                    line: None,
                    column: None,
                    message: None,
                }
            }
            Err(err) => {
                if !args.json {
                    let diagnostic = TemplateDiagnostic::from_parse_error(path, &content, &err);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                CheckResult {
                    file: path.display().to_string(),
                    ok: false,
                    line: Some(err.line()),
                    column: Some(err.column()),
                    message: Some(err.message()),
                }
            }
        };
        results.push(result);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results).into_diagnostic()?);
    }

    if results.iter().all(|r| r.ok) {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
