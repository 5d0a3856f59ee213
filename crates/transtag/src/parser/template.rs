//! Whole-template parser.
//!
//! Tokenizes template source and dispatches block tokens to the tag parsers.

use super::ast::{Node, ParsedTag, Template, Token, TokenKind};
use super::bits::is_variable_name;
use super::error::ParseError;
use super::lexer::TokenStream;
use super::tags::{
    BLOCK_TRANSLATE_TAG, CURRENT_LANGUAGE_TAG, LOAD_TAG, TRANSLATE_TAG, parse_block_translate,
    parse_current_language, parse_translate,
};

/// Parse a template string into an AST.
///
/// # Example
///
/// ```
/// use transtag::parser::{Node, parse_template};
///
/// let template = parse_template("{% load i18n %}Hello {{ name }}").unwrap();
/// assert_eq!(
///     template.nodes,
///     vec![Node::Text("Hello ".into()), Node::Variable("name".into())]
/// );
/// ```
pub fn parse_template(source: &str) -> Result<Template, ParseError> {
    let mut stream = TokenStream::from_source(source)?;
    let mut nodes: Vec<Node> = Vec::new();

    while let Some(token) = stream.next_token() {
        match token.kind {
            TokenKind::Text => push_text(&mut nodes, token.contents),
            TokenKind::Variable => nodes.push(parse_variable(&token)?),
            TokenKind::Comment => {}
            TokenKind::Block => {
                if let Some(tag) = parse_block(&token, &mut stream)? {
                    nodes.push(Node::Tag(tag));
                }
            }
        }
    }

    Ok(Template { nodes })
}

/// Append text, merging with a preceding text node.
fn push_text(nodes: &mut Vec<Node>, text: String) {
    if let Some(Node::Text(prev)) = nodes.last_mut() {
        prev.push_str(&text);
    } else {
        nodes.push(Node::Text(text));
    }
}

/// Parse a `{{ name }}` output.
fn parse_variable(token: &Token) -> Result<Node, ParseError> {
    if token.contents.is_empty() {
        return Err(ParseError::syntax(
            token,
            format!("Empty variable tag on line {}", token.line),
        ));
    }
    if !is_variable_name(&token.contents) {
        return Err(ParseError::syntax(
            token,
            format!("Could not parse the remainder: '{}'", token.contents),
        ));
    }
    Ok(Node::Variable(token.contents.clone()))
}

/// Dispatch a block token to its tag parser.
///
/// Returns `None` for tags that produce no node (`load`).
fn parse_block(token: &Token, stream: &mut TokenStream) -> Result<Option<ParsedTag>, ParseError> {
    let Some(name) = token.contents.split_whitespace().next() else {
        return Err(ParseError::syntax(
            token,
            format!("Empty block tag on line {}", token.line),
        ));
    };

    match name {
        CURRENT_LANGUAGE_TAG => parse_current_language(token).map(Some),
        TRANSLATE_TAG => parse_translate(token).map(Some),
        BLOCK_TRANSLATE_TAG => parse_block_translate(token, stream).map(Some),
        LOAD_TAG => Ok(None),
        _ => Err(ParseError::syntax(
            token,
            format!("Invalid block tag on line {}: '{name}'", token.line),
        )),
    }
}
