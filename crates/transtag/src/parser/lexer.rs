//! Template tokenizer using winnow.
//!
//! Splits template source into tokens:
//! - `{% ... %}` block directives
//! - `{{ ... }}` variables
//! - `{# ... #}` comments
//! - everything else as literal text

use std::collections::VecDeque;

use super::ast::{Token, TokenKind};
use super::error::ParseError;
use winnow::combinator::{alt, delimited, not, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_until};

/// Split template source into tokens.
///
/// Positions are recorded as 1-based line and column of each token start.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut remaining = source;
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;

    while !remaining.is_empty() {
        let before = remaining;
        let Ok((kind, contents)) = raw_token(&mut remaining) else {
            return Err(ParseError::UnclosedDelimiter {
                line,
                column,
                delimiter: opening_delimiter(before),
            });
        };
        tokens.push(Token::at(kind, contents, line, column));
        advance(&mut line, &mut column, &before[..before.len() - remaining.len()]);
    }

    Ok(tokens)
}

/// Move a line/column position past consumed text.
fn advance(line: &mut usize, column: &mut usize, consumed: &str) {
    for c in consumed.chars() {
        if c == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}

/// The delimiter that starts input a token could not be read from.
fn opening_delimiter(input: &str) -> &'static str {
    ["{%", "{{", "{#"]
        .into_iter()
        .find(|delimiter| input.starts_with(*delimiter))
        .unwrap_or("{")
}

/// Parse one raw token and its kind.
fn raw_token<'i>(input: &mut &'i str) -> ModalResult<(TokenKind, &'i str)> {
    alt((
        delimited("{%", take_until(0.., "%}"), "%}").map(|c| (TokenKind::Block, str::trim(c))),
        delimited("{{", take_until(0.., "}}"), "}}").map(|c| (TokenKind::Variable, str::trim(c))),
        delimited("{#", take_until(0.., "#}"), "#}").map(|c| (TokenKind::Comment, str::trim(c))),
        text.map(|t| (TokenKind::Text, t)),
    ))
    .parse_next(input)
}

/// Parse a run of text up to the next opening delimiter.
fn text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    repeat::<_, _, (), _, _>(1.., (not(opening), any))
        .take()
        .parse_next(input)
}

/// Parse any opening delimiter.
fn opening<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt(("{%", "{{", "{#")).parse_next(input)
}

/// A queue of tokens consumed by the template and tag parsers.
///
/// Block-style tags such as `blocktrans` pull the tokens of their body from
/// the stream until they reach their end marker.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// Tokenize source into a stream.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        tokenize(source).map(Self::new)
    }

    /// Take the next token, if any.
    pub fn next_token(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
