//! Coverage command implementation.

use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::OwoColorize;
use serde::Serialize;
use transtag::{CatalogWarning, DirectorySource, LanguageCode, TranslationStore};

use crate::output::table::{LanguageCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Directory containing `{code}.json` catalogs.
    #[arg(long)]
    pub catalogs: PathBuf,

    /// Source language whose keys every catalog should translate.
    #[arg(long, default_value = "en")]
    pub source: LanguageCode,

    /// Languages to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub lang: Vec<LanguageCode>,

    /// Exit with non-zero code if any catalog has a warning.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    warnings: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let source = DirectorySource::new(&args.catalogs);
    let store = TranslationStore::new();
    let mut languages = vec![args.source.clone()];
    languages.extend(args.lang.iter().cloned());
    store.ensure_loaded(&source, &languages).into_diagnostic()?;

    let source_catalog = store.catalog(&args.source).ok_or_else(|| {
        miette!(
            "No catalog for source language '{}' at {}",
            args.source,
            source.path_for(&args.source).display()
        )
    })?;
    let source_count = source_catalog.len();

    let mut coverage_data = Vec::new();
    let mut warnings_by_language = Vec::new();

    for lang in &args.lang {
        let warnings = if store.catalog(lang).is_some() {
            store.validate(&args.source, lang)
        } else {
            // No catalog: every source key is missing.
            source_catalog
                .keys()
                .map(|key| CatalogWarning::MissingKey {
                    key: key.to_string(),
                    language: lang.clone(),
                })
                .collect()
        };

        let missing: Vec<String> = warnings
            .iter()
            .filter_map(|w| match w {
                CatalogWarning::MissingKey { key, .. } => Some(key.clone()),
                CatalogWarning::UnknownKey { .. }
                | CatalogWarning::PlaceholderMismatch { .. }
                | CatalogWarning::MalformedFormat { .. } => None,
            })
            .collect();

        coverage_data.push(LanguageCoverage {
            language: lang.to_string(),
            translated: source_count - missing.len(),
            problems: warnings.len() - missing.len(),
            missing,
        });
        warnings_by_language.push(warnings);
    }

    let any_warning = warnings_by_language.iter().any(|w| !w.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .zip(&warnings_by_language)
            .map(|(c, warnings)| CoverageJson {
                language: c.language.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
                warnings: warnings.iter().map(ToString::to_string).collect(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{table}");

        for (lang_coverage, warnings) in coverage_data.iter().zip(&warnings_by_language) {
            if warnings.is_empty() {
                continue;
            }
            println!("\n{} {}:", "Problems in".yellow(), lang_coverage.language);
            for warning in warnings {
                println!("  - {warning}");
            }
        }
    }

    if args.strict && any_warning {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
