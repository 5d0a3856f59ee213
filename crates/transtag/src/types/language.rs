//! Language codes and the configured language set.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use icu_locale_core::LanguageIdentifier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A language code that failed BCP-47 validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid language code '{code}'")]
pub struct InvalidLanguageCode {
    pub code: String,
}

/// A validated language code such as `en`, `fr` or `zh-hans`.
///
/// The code is kept exactly as written, since it doubles as the catalog file
/// name (`{code}.json`) and as the value bound by `get_current_language`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Validate and wrap a language code.
    ///
    /// ```
    /// use transtag::LanguageCode;
    ///
    /// assert_eq!(LanguageCode::new("nl").unwrap().as_str(), "nl");
    /// assert!(LanguageCode::new("not a language").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> Result<Self, InvalidLanguageCode> {
        let code = code.into();
        if code.parse::<LanguageIdentifier>().is_err() {
            return Err(InvalidLanguageCode { code });
        }
        Ok(Self(code))
    }

    /// Wrap a code known to be valid at compile time.
    pub(crate) fn from_static(code: &'static str) -> Self {
        Self(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = InvalidLanguageCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = InvalidLanguageCode;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One entry of the configured language set: a code and its display name.
///
/// Deserializes from either `{"code": "fr", "name": "Français"}` or the
/// pair form `["fr", "Français"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: LanguageCode,
    pub name: String,
}

impl LanguageEntry {
    pub fn new(code: LanguageCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}
