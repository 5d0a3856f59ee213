//! Template and translation tag parser.
//!
//! Template source is first split into tokens (text, `{{ variable }}`,
//! `{% block %}` and `{# comment #}`), then block tokens are dispatched to
//! the tag parsers. The parser produces an AST that the render engine walks,
//! and which external tooling (the `transtag check` command) can inspect.

pub mod ast;
mod bits;
pub mod error;
mod lexer;
mod tags;
mod template;

pub use ast::*;
pub use bits::{is_identifier, is_variable_name, split_contents};
pub use error::ParseError;
pub use lexer::{TokenStream, tokenize};
pub use tags::{
    BLOCK_TRANSLATE_TAG, CURRENT_LANGUAGE_TAG, END_BLOCK_TRANSLATE_TAG, LOAD_TAG, TRANSLATE_TAG,
    parse_block_translate, parse_current_language, parse_translate,
};
pub use template::parse_template;
