//! Percent-style string interpolation.
//!
//! A `blocktrans` body is compiled into a format string in which literal `%`
//! is doubled and each placeholder becomes `%(name)s`. That format string is
//! both the catalog key and, once translated, the template that placeholder
//! values are substituted into.

use std::collections::BTreeMap;

use thiserror::Error;
use winnow::combinator::{alt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_until};

use crate::parser::BlockPart;

/// An error formatting a percent-style string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A placeholder has no value.
    #[error("missing value for placeholder '{name}'")]
    MissingKey { name: String },

    /// A conversion other than `s`.
    #[error("unsupported format character '{conversion}' in placeholder '{name}'")]
    UnsupportedConversion { name: String, conversion: char },

    /// A `%` that does not start `%%` or a complete `%(name)s`.
    #[error("incomplete format at byte {index}")]
    Incomplete { index: usize },
}

/// A compiled `blocktrans` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMessage {
    /// The format string, used verbatim as the catalog key.
    pub format: String,
    /// Placeholder names in order of first appearance.
    pub placeholders: Vec<String>,
}

/// Double every `%` so literal text survives formatting.
pub fn escape_percent(text: &str) -> String {
    text.replace('%', "%%")
}

/// Compile a block body into its format string and placeholder names.
///
/// ```
/// use transtag::parser::BlockPart;
/// use transtag::percent::block_message;
///
/// let message = block_message(&[
///     BlockPart::Literal("100% for ".into()),
///     BlockPart::Placeholder("name".into()),
/// ]);
/// assert_eq!(message.format, "100%% for %(name)s");
/// assert_eq!(message.placeholders, vec!["name".to_string()]);
/// ```
pub fn block_message(body: &[BlockPart]) -> BlockMessage {
    let mut format = String::new();
    let mut placeholders: Vec<String> = Vec::new();
    for part in body {
        match part {
            BlockPart::Literal(text) => format.push_str(&escape_percent(text)),
            BlockPart::Placeholder(name) => {
                format.push_str("%(");
                format.push_str(name);
                format.push_str(")s");
                if !placeholders.contains(name) {
                    placeholders.push(name.clone());
                }
            }
        }
    }
    BlockMessage {
        format,
        placeholders,
    }
}

/// Substitute named values into a percent-style format string.
///
/// Supports `%%` and `%(name)s`. Values not referenced by the template are
/// ignored.
pub fn format(template: &str, values: &BTreeMap<String, String>) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    for piece in pieces(template)? {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Percent => out.push('%'),
            Piece::Named { name, conversion } => {
                check_conversion(name, conversion)?;
                let value = values.get(name).ok_or_else(|| FormatError::MissingKey {
                    name: name.to_string(),
                })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

/// Names of the placeholders in a format string, in order of first appearance.
pub fn placeholders(template: &str) -> Result<Vec<String>, FormatError> {
    let mut names: Vec<String> = Vec::new();
    for piece in pieces(template)? {
        if let Piece::Named { name, conversion } = piece {
            check_conversion(name, conversion)?;
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

fn check_conversion(name: &str, conversion: char) -> Result<(), FormatError> {
    if conversion == 's' {
        Ok(())
    } else {
        Err(FormatError::UnsupportedConversion {
            name: name.to_string(),
            conversion,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Percent,
    Named { name: &'a str, conversion: char },
}

/// Split a format string into pieces.
fn pieces(template: &str) -> Result<Vec<Piece<'_>>, FormatError> {
    let mut remaining = template;
    let parsed: Result<Vec<Piece<'_>>, _> = repeat(0.., piece).parse_next(&mut remaining);
    match parsed {
        Ok(parsed) if remaining.is_empty() => Ok(parsed),
        _ => Err(FormatError::Incomplete {
            index: template.len() - remaining.len(),
        }),
    }
}

/// Parse one piece: a text run, `%%`, or `%(name)c`.
fn piece<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((
        take_till(1.., '%').map(Piece::Text),
        "%%".value(Piece::Percent),
        preceded("%(", (take_until(0.., ")"), preceded(')', any)))
            .map(|(name, conversion)| Piece::Named { name, conversion }),
    ))
    .parse_next(input)
}
