//! Error and warning types for catalog loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::LanguageCode;

/// A failure fetching one language's catalog document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The resource answered with a non-success status.
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    /// File I/O error when reading a catalog file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource could not be reached at all.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl FetchError {
    /// A `404 Not Found` status.
    pub fn not_found() -> Self {
        FetchError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        }
    }

    /// Whether the load may skip this language and continue.
    ///
    /// Only status failures are skipped; anything else aborts the load.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }
}

/// Errors that abort loading the translation store.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A catalog could not be fetched for a reason other than its status.
    #[error("failed to fetch '{location}' for language '{language}': {source}")]
    Fetch {
        language: LanguageCode,
        location: String,
        #[source]
        source: FetchError,
    },

    /// A catalog document is not a flat JSON object of strings.
    #[error("invalid catalog '{location}' for language '{language}': {source}")]
    Parse {
        language: LanguageCode,
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems found when comparing a translated catalog against its source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogWarning {
    /// A source key has no translation.
    #[error("'{language}' has no translation for '{key}'")]
    MissingKey { key: String, language: LanguageCode },

    /// A translated key that the source catalog does not define.
    #[error("'{language}' translates unknown key '{key}'")]
    UnknownKey { key: String, language: LanguageCode },

    /// The translation uses a different set of `%(name)s` placeholders.
    #[error(
        "'{language}' translation of '{key}' uses placeholders [{}], expected [{}]",
        found.join(", "),
        expected.join(", ")
    )]
    PlaceholderMismatch {
        key: String,
        language: LanguageCode,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The translation cannot be used as a percent-style format string.
    #[error("'{language}' translation of '{key}' is not a valid format string: {message}")]
    MalformedFormat {
        key: String,
        language: LanguageCode,
        message: String,
    },
}
