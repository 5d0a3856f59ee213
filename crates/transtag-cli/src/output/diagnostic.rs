//! Miette diagnostic wrapper for template parse errors.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use transtag::ParseError;

/// A miette-compatible diagnostic for template parse errors.
///
/// Fields are read by the miette derive macros.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(transtag::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let help = match err {
            ParseError::UnclosedDelimiter { delimiter, .. } => {
                Some(format!("close it with '{}'", closing(delimiter)))
            }
            ParseError::Syntax { .. } => None,
        };
        let (offset, length) = span_at(content, err.line(), err.column());

        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, length).into(),
            message: err.message(),
            help,
        }
    }
}

fn closing(opening: &str) -> &'static str {
    match opening {
        "{{" => "}}",
        "{#" => "#}",
        _ => "%}",
    }
}

/// Byte span of the token starting at a 1-based line and column.
///
/// Tags span up to their closing delimiter; other positions get a single
/// character.
fn span_at(content: &str, line: usize, column: usize) -> (usize, usize) {
    let offset = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();
    let line_text = content[offset..].lines().next().unwrap_or_default();
    let column_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(line_text.len(), |(index, _)| index);
    let start = (offset + column_offset).min(content.len());

    let rest = &content[start..];
    let length = match rest.get(..2).map(closing) {
        Some(close) if rest.starts_with('{') => rest
            .find(close)
            .map_or(1, |end| end + close.len()),
        _ => 1,
    };
    (start, length.min(content.len() - start))
}
