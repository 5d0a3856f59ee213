//! Parse error types for templates and translation tags.

use thiserror::Error;

/// An error that occurred while tokenizing or parsing a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A malformed tag directive or template construct.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// An opening `{%`, `{{` or `{#` without its closing counterpart.
    #[error("unclosed '{delimiter}' delimiter at {line}:{column}")]
    UnclosedDelimiter {
        line: usize,
        column: usize,
        delimiter: &'static str,
    },
}

impl ParseError {
    /// Line of the offending token (1-based).
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::UnclosedDelimiter { line, .. } => *line,
        }
    }

    /// Column of the offending token (1-based).
    pub fn column(&self) -> usize {
        match self {
            ParseError::Syntax { column, .. } | ParseError::UnclosedDelimiter { column, .. } => {
                *column
            }
        }
    }

    /// The error message without location.
    pub fn message(&self) -> String {
        match self {
            ParseError::Syntax { message, .. } => message.clone(),
            ParseError::UnclosedDelimiter { delimiter, .. } => {
                format!("unclosed '{delimiter}' delimiter")
            }
        }
    }
}

impl ParseError {
    /// A syntax error located at a token.
    pub fn syntax(token: &super::ast::Token, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line: token.line,
            column: token.column,
            message: message.into(),
        }
    }
}
