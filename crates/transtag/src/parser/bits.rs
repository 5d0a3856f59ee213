//! Splitting of tag contents into bits.
//!
//! Tag contents are split on whitespace, except that quoted strings stay
//! together: `trans "hello world" as greeting` has four bits.

use super::ast::Token;
use super::error::ParseError;
use winnow::combinator::{alt, preceded, repeat, terminated};
use winnow::prelude::*;
use winnow::token::{any, none_of, take_while};

/// Split a block token's contents into bits, keeping quoted strings whole.
///
/// An unterminated quote is a syntax error.
pub fn split_contents(token: &Token) -> Result<Vec<String>, ParseError> {
    let mut remaining = token.contents.as_str();
    let bits: Vec<&str> = terminated(repeat(0.., preceded(ws, bit)), ws)
        .parse_next(&mut remaining)
        .map_err(|e| ParseError::syntax(token, format!("parse error: {e}")))?;

    if !remaining.is_empty() {
        return Err(ParseError::syntax(
            token,
            format!("unterminated string literal in '{}'", token.contents),
        ));
    }

    Ok(bits.into_iter().map(str::to_string).collect())
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

/// Parse a single bit: a run of quoted strings and unquoted non-space text.
fn bit<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    repeat::<_, _, (), _, _>(
        1..,
        alt((
            double_quoted.void(),
            single_quoted.void(),
            none_of(|c: char| c.is_whitespace() || c == '"' || c == '\'').void(),
        )),
    )
    .take()
    .parse_next(input)
}

/// Parse a double-quoted string, honouring backslash escapes.
fn double_quoted<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        '"',
        repeat::<_, _, (), _, _>(
            0..,
            alt((('\\', any).void(), none_of(['"', '\\']).void())),
        ),
        '"',
    )
        .take()
        .parse_next(input)
}

/// Parse a single-quoted string, honouring backslash escapes.
fn single_quoted<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        '\'',
        repeat::<_, _, (), _, _>(
            0..,
            alt((('\\', any).void(), none_of(['\'', '\\']).void())),
        ),
        '\'',
    )
        .take()
        .parse_next(input)
}

/// Whether a bit is a complete quoted string literal.
pub(crate) fn is_quoted(bit: &str) -> bool {
    let mut chars = bit.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => first == last && (first == '"' || first == '\''),
        _ => false,
    }
}

/// Strip the quotes of a string literal and resolve its escapes.
pub(crate) fn unescape_string_literal(bit: &str) -> String {
    let quote = &bit[..1];
    let inner = &bit[1..bit.len() - 1];
    inner
        .replace(&format!("\\{quote}"), quote)
        .replace("\\\\", "\\")
}

/// Whether `name` is a plain identifier usable as an output variable.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `name` is a variable reference: dot-separated segments of
/// alphanumerics and underscores, none starting with an underscore.
pub fn is_variable_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            !segment.is_empty()
                && !segment.starts_with('_')
                && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::TokenKind;

    fn split(contents: &str) -> Vec<String> {
        split_contents(&Token::new(TokenKind::Block, contents)).unwrap()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split("trans  hello\tas  x"), vec!["trans", "hello", "as", "x"]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(split("  trans x  \n"), vec!["trans", "x"]);
        assert!(split("   ").is_empty());
    }

    #[test]
    fn keeps_quoted_strings_together() {
        assert_eq!(
            split(r#"trans "hello world" as greeting"#),
            vec!["trans", "\"hello world\"", "as", "greeting"]
        );
        assert_eq!(split("trans 'it is'"), vec!["trans", "'it is'"]);
    }

    #[test]
    fn keeps_escaped_quotes_inside_strings() {
        assert_eq!(
            split(r#"trans "say \"hi\" now""#),
            vec!["trans", r#""say \"hi\" now""#]
        );
    }

    #[test]
    fn quoted_text_joins_adjacent_text() {
        assert_eq!(split(r#"trans _("a b")"#), vec!["trans", r#"_("a b")"#]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = split_contents(&Token::new(TokenKind::Block, r#"trans "oops"#)).unwrap_err();
        assert!(err.message().contains("unterminated string literal"));
    }

    #[test]
    fn unescapes_literals() {
        assert_eq!(unescape_string_literal(r#""say \"hi\"""#), r#"say "hi""#);
        assert_eq!(unescape_string_literal(r"'a\\b'"), r"a\b");
        assert!(is_quoted("\"x\""));
        assert!(!is_quoted("\"x'"));
        assert!(!is_quoted("\""));
    }

    #[test]
    fn validates_names() {
        assert!(is_identifier("greeting"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("a.b"));
        assert!(is_variable_name("user.name"));
        assert!(!is_variable_name("user._secret"));
        assert!(!is_variable_name("name|upper"));
        assert!(!is_variable_name(""));
    }
}
