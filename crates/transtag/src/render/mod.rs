//! Render engine for parsed templates and translation tags.
//!
//! The engine resolves tags against a [`TranslationStore`](crate::TranslationStore),
//! loading it on first use, and reads and writes variables in a
//! [`RenderContext`].

mod context;
mod engine;
mod error;
mod escape;

pub use context::RenderContext;
pub use engine::Renderer;
pub use error::RenderError;
pub use escape::escape_html;
