//! Public AST types for templates and translation tags.
//!
//! These types are public to enable external tooling (linters, checkers, etc.).

/// The kind of a template token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text between tags.
    Text,
    /// A `{{ name }}` variable.
    Variable,
    /// A `{% ... %}` block directive.
    Block,
    /// A `{# ... #}` comment.
    Comment,
}

/// A single template token.
///
/// For `Variable`, `Block` and `Comment` tokens `contents` is the text between
/// the delimiters with surrounding whitespace trimmed. For `Text` tokens it is
/// the text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub contents: String,
    /// Line of the token start (1-based).
    pub line: usize,
    /// Column of the token start (1-based).
    pub column: usize,
}

impl Token {
    /// Create a token positioned at the start of the input.
    pub fn new(kind: TokenKind, contents: impl Into<String>) -> Self {
        Self::at(kind, contents, 1, 1)
    }

    /// Create a token at the given position.
    pub fn at(kind: TokenKind, contents: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            contents: contents.into(),
            line,
            column,
        }
    }
}

/// The message argument of a `trans` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A quoted string or number, used verbatim as the message key.
    Literal(String),
    /// A context variable whose value is used as the message key.
    Variable(String),
}

/// One piece of a `blocktrans` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockPart {
    /// Literal text, stored unescaped.
    Literal(String),
    /// A `{{ name }}` placeholder.
    Placeholder(String),
}

/// A parsed translation tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTag {
    /// `{% get_current_language as VAR %}`
    CurrentLanguage { output_variable: String },
    /// `{% trans EXPR [as VAR] %}`
    Translate {
        source: Expression,
        output_variable: Option<String>,
    },
    /// `{% blocktrans %}...{% endblocktrans %}`
    BlockTranslate { body: Vec<BlockPart> },
}

/// A node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text.
    Text(String),
    /// A `{{ name }}` output.
    Variable(String),
    /// A translation tag.
    Tag(ParsedTag),
}

/// A parsed template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub nodes: Vec<Node>,
}
