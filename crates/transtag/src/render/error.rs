//! Error types for rendering.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::LoadError;
use crate::percent::FormatError;

/// An error that aborts rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The translation store could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A block translation could not be formatted, even in the neutral
    /// language.
    #[error(
        "'blocktrans' is unable to format string returned by gettext: {message:?} using {values:?}"
    )]
    Syntax {
        message: String,
        values: BTreeMap<String, String>,
        #[source]
        source: FormatError,
    },
}
