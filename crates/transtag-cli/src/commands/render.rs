//! Implementation of the `transtag render` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Report, miette};
use serde::Serialize;
use transtag::{
    DirectorySource, LanguageCode, LanguageEntry, RenderContext, Renderer, Settings,
    TranslationStore, Value, parse_template,
};

use crate::output::TemplateDiagnostic;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template file to render
    pub template: PathBuf,

    /// Directory containing `{code}.json` catalogs
    #[arg(long)]
    pub catalogs: PathBuf,

    /// Active language (defaults to the settings' language code)
    #[arg(long)]
    pub lang: Option<LanguageCode>,

    /// Settings file (JSON)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Variables in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
pub struct RenderResult {
    pub result: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Numbers become numeric values, everything else a string.
fn param_value(raw: String) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(raw),
    }
}

/// Settings from `--settings`, with `--lang` as the active language.
///
/// Without a configured language set, only the active language is loaded.
fn load_settings(args: &RenderArgs) -> miette::Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_path(path).into_diagnostic()?,
        None => Settings::default(),
    };
    if let Some(lang) = &args.lang {
        settings.language_code = lang.clone();
    }
    if settings.languages.is_empty() {
        let code = settings.language_code.clone();
        settings.languages.push(LanguageEntry::new(code.clone(), code.as_str()));
    }
    Ok(settings)
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let settings = load_settings(&args)?;
    let content = read_to_string(&args.template)
        .into_diagnostic()
        .map_err(|e| miette!("Cannot read template {}: {e}", args.template.display()))?;

    let template = match parse_template(&content) {
        Ok(template) => template,
        Err(err) => {
            let diagnostic = TemplateDiagnostic::from_parse_error(&args.template, &content, &err);
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };

    let source = DirectorySource::new(&args.catalogs);
    let store = TranslationStore::with_policy(settings.cache_policy);
    let renderer = Renderer::new(&settings, &store, &source);

    let mut ctx = RenderContext::from_settings(&settings);
    for (name, raw) in args.params {
        ctx.set(name, param_value(raw));
    }

    match renderer.render(&template, &mut ctx) {
        Ok(result) => {
            if args.json {
                let output = RenderResult { result };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                print!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({ "error": e.to_string() });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Render error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parses_key_value_params() {
        assert_eq!(
            parse_key_val("name=Sam=I am").unwrap(),
            ("name".to_string(), "Sam=I am".to_string())
        );
        assert!(parse_key_val("name").is_err());
    }

    #[test]
    fn numeric_params_become_numbers() {
        assert_eq!(param_value("3".into()), Value::Number(3));
        assert_eq!(param_value("Sam".into()), Value::from("Sam"));
    }

    #[test]
    fn lang_overrides_settings_and_seeds_language_set() {
        let dir = TempDir::new().unwrap();
        let settings_path = dir.path().join("settings.json");
        fs::write(&settings_path, r#"{"language_code": "fr"}"#).unwrap();

        let args = RenderArgs {
            template: dir.path().join("t.html"),
            catalogs: dir.path().to_path_buf(),
            lang: Some(LanguageCode::new("nl").unwrap()),
            settings: Some(settings_path),
            params: Vec::new(),
            json: false,
        };
        let settings = load_settings(&args).unwrap();

        assert_eq!(settings.language_code.as_str(), "nl");
        assert_eq!(settings.language_codes(), vec![LanguageCode::new("nl").unwrap()]);
    }
}
