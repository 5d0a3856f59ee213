//! Catalog sources: where the per-language JSON documents come from.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[cfg(feature = "http")]
use reqwest::StatusCode;
#[cfg(feature = "http")]
use reqwest::blocking::Client;

use crate::catalog::FetchError;
use crate::types::LanguageCode;

/// The capability to fetch the raw catalog document of one language.
///
/// Any `Fn(&LanguageCode) -> Result<Vec<u8>, FetchError>` is a source, which
/// keeps tests and embedders free of filesystem or network access.
pub trait CatalogSource {
    /// Fetch the raw JSON bytes of a language's catalog.
    fn fetch(&self, language: &LanguageCode) -> Result<Vec<u8>, FetchError>;

    /// Human-readable location of a language's catalog, used in logs and errors.
    fn location(&self, language: &LanguageCode) -> String {
        format!("<{language}>")
    }
}

impl<F> CatalogSource for F
where
    F: Fn(&LanguageCode) -> Result<Vec<u8>, FetchError>,
{
    fn fetch(&self, language: &LanguageCode) -> Result<Vec<u8>, FetchError> {
        self(language)
    }
}

/// Reads `{root}/{code}.json` from a directory.
///
/// A missing file is reported as a `404 Not Found` status, so the language is
/// skipped just like a missing static file would be.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of a language's catalog file.
    pub fn path_for(&self, language: &LanguageCode) -> PathBuf {
        self.root.join(format!("{language}.json"))
    }
}

impl CatalogSource for DirectorySource {
    fn fetch(&self, language: &LanguageCode) -> Result<Vec<u8>, FetchError> {
        let path = self.path_for(language);
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::not_found(),
            _ => FetchError::Io { path, source: e },
        })
    }

    fn location(&self, language: &LanguageCode) -> String {
        self.path_for(language).display().to_string()
    }
}

/// Catalog documents held in memory, e.g. from `include_bytes!`.
///
/// # Example
///
/// ```
/// use transtag::{CatalogSource, LanguageCode, MemorySource};
///
/// let fr = LanguageCode::new("fr").unwrap();
/// let source = MemorySource::new().with(fr.clone(), r#"{"hello": "Bonjour"}"#);
/// assert!(source.fetch(&fr).is_ok());
/// assert!(source.fetch(&LanguageCode::new("de").unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<LanguageCode, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any previous one for the language.
    pub fn insert(&mut self, language: LanguageCode, document: impl Into<Vec<u8>>) {
        self.documents.insert(language, document.into());
    }

    /// Builder-style variant of [`MemorySource::insert`].
    pub fn with(mut self, language: LanguageCode, document: impl Into<Vec<u8>>) -> Self {
        self.insert(language, document);
        self
    }
}

impl CatalogSource for MemorySource {
    fn fetch(&self, language: &LanguageCode) -> Result<Vec<u8>, FetchError> {
        self.documents
            .get(language)
            .cloned()
            .ok_or_else(FetchError::not_found)
    }

    fn location(&self, language: &LanguageCode) -> String {
        format!("<memory:{language}>")
    }
}

/// Fetches `{base_url}{static_url}lang/{code}.json` over HTTP.
///
/// Only a `200 OK` response is accepted; any other status skips the language.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
    static_url: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Create a source for a site root such as `https://example.org` and a
    /// static prefix such as `/static/`.
    pub fn new(base_url: impl Into<String>, static_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            static_url: static_url.into(),
        }
    }

    /// Absolute URL of a language's catalog.
    pub fn url_for(&self, language: &LanguageCode) -> String {
        format!(
            "{}{}lang/{language}.json",
            self.base_url.trim_end_matches('/'),
            self.static_url
        )
    }
}

#[cfg(feature = "http")]
impl CatalogSource for HttpSource {
    fn fetch(&self, language: &LanguageCode) -> Result<Vec<u8>, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            message: e.to_string(),
        };
        let response = self
            .client
            .get(self.url_for(language))
            .send()
            .map_err(transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(transport)
    }

    fn location(&self, language: &LanguageCode) -> String {
        self.url_for(language)
    }
}
