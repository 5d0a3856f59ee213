//! Site-wide settings: the configured languages and rendering defaults.

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CachePolicy;
use crate::types::{LanguageCode, LanguageEntry};

/// Errors reading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File I/O error when reading a settings file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid.
    #[error("invalid settings: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration shared by every render.
///
/// Built with [`Settings::builder`] or read from JSON:
///
/// ```
/// use transtag::{CachePolicy, Settings};
///
/// let settings = Settings::from_json_str(r#"{
///     "language_code": "nl",
///     "languages": [["nl", "Nederlands"], ["fr", "Français"]],
///     "cache_policy": {"refresh_after": {"seconds": 300}}
/// }"#).unwrap();
///
/// assert_eq!(settings.language_code.as_str(), "nl");
/// assert_eq!(settings.languages.len(), 2);
/// assert_eq!(settings.static_url, "/static/");
/// assert_eq!(settings.cache_policy, CachePolicy::RefreshAfter { seconds: 300 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Settings {
    /// Language active in new render contexts.
    #[builder(default = default_language_code())]
    #[serde(default = "default_language_code")]
    pub language_code: LanguageCode,

    /// The configured language set, in order. Catalogs are loaded for these.
    #[builder(default)]
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,

    /// Prefix of static resources; catalogs live at `{static_url}lang/{code}.json`.
    #[builder(default = default_static_url())]
    #[serde(default = "default_static_url")]
    pub static_url: String,

    /// Rendered in place of missing variables; `%s` is replaced by the name.
    #[builder(default)]
    #[serde(default)]
    pub string_if_invalid: String,

    /// HTML-escape rendered values.
    #[builder(default = true)]
    #[serde(default = "default_autoescape")]
    pub autoescape: bool,

    /// When loaded catalogs become stale.
    #[builder(default)]
    #[serde(default)]
    pub cache_policy: CachePolicy,
}

fn default_language_code() -> LanguageCode {
    LanguageCode::from_static("en")
}

fn default_static_url() -> String {
    "/static/".to_string()
}

fn default_autoescape() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings::builder().build()
    }
}

impl Settings {
    /// Parse settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Json { source })
    }

    /// Read settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Codes of the configured languages, in order.
    pub fn language_codes(&self) -> Vec<LanguageCode> {
        self.languages.iter().map(|entry| entry.code.clone()).collect()
    }

    /// Display name of a configured language.
    pub fn language_name(&self, code: &LanguageCode) -> Option<&str> {
        self.languages
            .iter()
            .find(|entry| &entry.code == code)
            .map(|entry| entry.name.as_str())
    }

    /// Static path of a language's catalog, e.g. `/static/lang/fr.json`.
    pub fn catalog_path(&self, code: &LanguageCode) -> String {
        format!("{}lang/{code}.json", self.static_url)
    }
}
