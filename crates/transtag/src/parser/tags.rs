//! Parsers for the three translation tags.
//!
//! Each entry point consumes a single block token. `blocktrans` also pulls
//! the tokens of its body from the token stream up to `endblocktrans`.

use super::ast::{BlockPart, Expression, ParsedTag, Token, TokenKind};
use super::bits::{is_identifier, is_quoted, is_variable_name, split_contents, unescape_string_literal};
use super::error::ParseError;
use super::lexer::TokenStream;

pub const CURRENT_LANGUAGE_TAG: &str = "get_current_language";
pub const TRANSLATE_TAG: &str = "trans";
pub const BLOCK_TRANSLATE_TAG: &str = "blocktrans";
pub const END_BLOCK_TRANSLATE_TAG: &str = "endblocktrans";
pub const LOAD_TAG: &str = "load";

/// Parse `{% get_current_language as VAR %}`.
///
/// The contents must be exactly three words with `as` in the middle.
pub fn parse_current_language(token: &Token) -> Result<ParsedTag, ParseError> {
    let args: Vec<&str> = token.contents.split_whitespace().collect();
    if args.len() != 3 || args[1] != "as" {
        return Err(ParseError::syntax(
            token,
            format!("'{CURRENT_LANGUAGE_TAG}' requires 'as variable' (got {args:?})"),
        ));
    }
    if !is_identifier(args[2]) {
        return Err(ParseError::syntax(
            token,
            format!("'{}' is not a valid variable name", args[2]),
        ));
    }
    Ok(ParsedTag::CurrentLanguage {
        output_variable: args[2].to_string(),
    })
}

/// Parse `{% trans EXPR [as VAR] %}`.
///
/// `EXPR` is a quoted string, a number or a variable name. The only trailing
/// clause accepted is a single `as VAR`.
pub fn parse_translate(token: &Token) -> Result<ParsedTag, ParseError> {
    let bits = split_contents(token)?;
    let tag = bits.first().map_or(TRANSLATE_TAG, String::as_str);
    if bits.len() < 2 {
        return Err(ParseError::syntax(
            token,
            format!("'{tag}' takes at least one argument"),
        ));
    }

    let source = parse_expression(token, &bits[1])?;
    let mut remaining = bits[2..].iter();
    let mut output_variable: Option<String> = None;

    while let Some(option) = remaining.next() {
        if option != "as" {
            return Err(ParseError::syntax(
                token,
                format!(
                    "Unknown argument for '{tag}' tag: '{option}'. The only option available is 'as VAR'."
                ),
            ));
        }
        if output_variable.is_some() {
            return Err(ParseError::syntax(
                token,
                "The 'as' option was specified more than once.",
            ));
        }
        let Some(name) = remaining.next() else {
            return Err(ParseError::syntax(
                token,
                format!("No argument provided to the '{tag}' tag for the as option."),
            ));
        };
        if !is_identifier(name) {
            return Err(ParseError::syntax(
                token,
                format!("'{name}' is not a valid variable name"),
            ));
        }
        output_variable = Some(name.clone());
    }

    Ok(ParsedTag::Translate {
        source,
        output_variable,
    })
}

/// Parse `{% blocktrans %}...{% endblocktrans %}`.
///
/// Text tokens become literal parts and `{{ name }}` tokens become
/// placeholders. Comments are dropped. Any other block tag inside the body
/// is an error, as is reaching the end of input before `endblocktrans`.
pub fn parse_block_translate(
    token: &Token,
    stream: &mut TokenStream,
) -> Result<ParsedTag, ParseError> {
    let bits = split_contents(token)?;
    if bits.len() > 1 {
        return Err(ParseError::syntax(
            token,
            format!("'{BLOCK_TRANSLATE_TAG}' takes no arguments (got '{}')", bits[1..].join(" ")),
        ));
    }

    let mut body: Vec<BlockPart> = Vec::new();
    loop {
        let Some(next) = stream.next_token() else {
            return Err(ParseError::syntax(
                token,
                format!(
                    "Unclosed tag '{BLOCK_TRANSLATE_TAG}'. Looking for '{END_BLOCK_TRANSLATE_TAG}'."
                ),
            ));
        };
        match next.kind {
            TokenKind::Text => push_literal(&mut body, next.contents),
            TokenKind::Variable => {
                if !is_variable_name(&next.contents) {
                    return Err(ParseError::syntax(
                        &next,
                        format!("Could not parse the remainder: '{}'", next.contents),
                    ));
                }
                body.push(BlockPart::Placeholder(next.contents));
            }
            TokenKind::Comment => {}
            TokenKind::Block if next.contents == END_BLOCK_TRANSLATE_TAG => {
                return Ok(ParsedTag::BlockTranslate { body });
            }
            TokenKind::Block => {
                return Err(ParseError::syntax(
                    &next,
                    format!(
                        "'{BLOCK_TRANSLATE_TAG}' doesn't allow other block tags (seen '{}') inside it",
                        next.contents
                    ),
                ));
            }
        }
    }
}

/// Append literal text, merging with a preceding literal.
fn push_literal(body: &mut Vec<BlockPart>, text: String) {
    if let Some(BlockPart::Literal(prev)) = body.last_mut() {
        prev.push_str(&text);
    } else {
        body.push(BlockPart::Literal(text));
    }
}

/// Classify the message argument of `trans`.
fn parse_expression(token: &Token, bit: &str) -> Result<Expression, ParseError> {
    if is_quoted(bit) {
        return Ok(Expression::Literal(unescape_string_literal(bit)));
    }
    if bit.starts_with(|c: char| c.is_ascii_digit() || c == '-') && bit.parse::<f64>().is_ok() {
        return Ok(Expression::Literal(bit.to_string()));
    }
    if is_variable_name(bit) {
        return Ok(Expression::Variable(bit.to_string()));
    }
    Err(ParseError::syntax(
        token,
        format!("Could not parse the remainder: '{bit}'"),
    ))
}
