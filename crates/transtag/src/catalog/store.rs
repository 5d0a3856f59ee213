//! The translation store: per-language catalogs, loaded lazily.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::catalog::error::{CatalogWarning, LoadError};
use crate::catalog::source::CatalogSource;
use crate::catalog::suggest::compute_suggestions;
use crate::catalog::validate::compare_catalogs;
use crate::types::LanguageCode;

/// One language's catalog: message key to translated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of strings.
    ///
    /// ```
    /// use transtag::Catalog;
    ///
    /// let catalog = Catalog::from_json(br#"{"hello": "Bonjour"}"#).unwrap();
    /// assert_eq!(catalog.get("hello"), Some("Bonjour"));
    /// assert!(Catalog::from_json(br#"{"nested": {"a": "b"}}"#).is_err());
    /// ```
    pub fn from_json(document: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(document).map(|entries| Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// When a loaded store is considered stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Load once and keep the catalogs for the lifetime of the store.
    #[default]
    LoadOnce,
    /// Discard and reload catalogs once they are older than `seconds`.
    RefreshAfter { seconds: u64 },
}

#[derive(Debug, Default)]
struct StoreState {
    catalogs: BTreeMap<LanguageCode, Catalog>,
    loaded_at: Option<Instant>,
}

impl StoreState {
    /// Whether the loaded catalogs can be used as they are.
    fn is_current(&self, policy: CachePolicy) -> bool {
        if self.catalogs.is_empty() {
            return false;
        }
        match policy {
            CachePolicy::LoadOnce => true,
            CachePolicy::RefreshAfter { seconds } => self
                .loaded_at
                .is_some_and(|at| at.elapsed() < Duration::from_secs(seconds)),
        }
    }
}

/// Per-language translation catalogs, populated lazily from a [`CatalogSource`].
///
/// The store is an explicitly owned value: create one per site (or use the
/// `global-store` feature), hand it to every [`Renderer`](crate::Renderer),
/// and call [`reset`](Self::reset) to drop its contents. Reads and the
/// one-time load are guarded by a lock, so a store can be shared by
/// reference across threads.
///
/// # Example
///
/// ```
/// use transtag::{LanguageCode, MemorySource, TranslationStore};
///
/// let fr = LanguageCode::new("fr").unwrap();
/// let source = MemorySource::new().with(fr.clone(), r#"{"hello": "Bonjour"}"#);
///
/// let store = TranslationStore::new();
/// store.ensure_loaded(&source, &[fr.clone()]).unwrap();
///
/// assert_eq!(store.lookup(&fr, "hello").as_deref(), Some("Bonjour"));
/// assert_eq!(store.lookup(&fr, "goodbye"), None);
/// ```
#[derive(Debug, Default)]
pub struct TranslationStore {
    policy: CachePolicy,
    state: RwLock<StoreState>,
}

impl TranslationStore {
    /// Create an empty store that loads once.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given staleness policy.
    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            policy,
            state: RwLock::default(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load the catalogs of `languages` unless the store already holds
    /// current entries.
    ///
    /// Each language is fetched once. A non-success status skips that
    /// language with a warning and loading continues. A transport failure or
    /// a malformed document aborts the load.
    ///
    /// Fetched catalogs replace the installed ones only once every language
    /// has been read. A language skipped during a refresh keeps its previous
    /// catalog. When a load aborts, previously installed catalogs stay as
    /// they are and catalogs fetched before the failure are installed only
    /// for languages that had none.
    pub fn ensure_loaded(
        &self,
        source: &dyn CatalogSource,
        languages: &[LanguageCode],
    ) -> Result<(), LoadError> {
        if self.read().is_current(self.policy) {
            return Ok(());
        }

        let mut state = self.write();
        if state.is_current(self.policy) {
            return Ok(());
        }
        if !state.catalogs.is_empty() {
            debug!(policy = ?self.policy, "catalogs are stale, reloading");
        }

        let mut fetched = BTreeMap::new();
        if let Err(err) = fetch_catalogs(source, languages, &mut fetched) {
            for (language, catalog) in fetched {
                state.catalogs.entry(language).or_insert(catalog);
            }
            if !state.catalogs.is_empty() {
                state.loaded_at.get_or_insert_with(Instant::now);
            }
            return Err(err);
        }

        for language in languages {
            if let Some(previous) = state.catalogs.remove(language) {
                fetched.entry(language.clone()).or_insert(previous);
            }
        }
        state.loaded_at = (!fetched.is_empty()).then(Instant::now);
        state.catalogs = fetched;
        Ok(())
    }

    /// Drop every catalog; the next [`ensure_loaded`](Self::ensure_loaded)
    /// fetches again.
    pub fn reset(&self) {
        let mut state = self.write();
        state.catalogs.clear();
        state.loaded_at = None;
    }

    /// Whether any catalog is loaded.
    pub fn is_loaded(&self) -> bool {
        !self.read().catalogs.is_empty()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Look up the translation of `key` in `language`.
    pub fn lookup(&self, language: &LanguageCode, key: &str) -> Option<String> {
        self.read()
            .catalogs
            .get(language)
            .and_then(|catalog| catalog.get(key))
            .map(str::to_string)
    }

    /// Languages with a loaded catalog, in sorted order.
    pub fn languages(&self) -> Vec<LanguageCode> {
        self.read().catalogs.keys().cloned().collect()
    }

    /// A copy of one language's catalog.
    pub fn catalog(&self, language: &LanguageCode) -> Option<Catalog> {
        self.read().catalogs.get(language).cloned()
    }

    /// Keys of `language` close to `key`, for "did you mean" hints.
    pub fn suggestions(&self, language: &LanguageCode, key: &str) -> Vec<String> {
        let state = self.read();
        let Some(catalog) = state.catalogs.get(language) else {
            return Vec::new();
        };
        let keys: Vec<&str> = catalog.keys().collect();
        compute_suggestions(key, &keys)
    }

    /// Compare the catalog of `target_language` against `source_language`.
    ///
    /// Returns an empty vector if either language is not loaded.
    pub fn validate(
        &self,
        source_language: &LanguageCode,
        target_language: &LanguageCode,
    ) -> Vec<CatalogWarning> {
        let state = self.read();
        let (Some(source), Some(target)) = (
            state.catalogs.get(source_language),
            state.catalogs.get(target_language),
        ) else {
            return Vec::new();
        };
        compare_catalogs(source, target, target_language)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fetch and parse the catalogs of `languages` into `catalogs`.
///
/// Stops at the first fatal error, leaving the catalogs read so far.
fn fetch_catalogs(
    source: &dyn CatalogSource,
    languages: &[LanguageCode],
    catalogs: &mut BTreeMap<LanguageCode, Catalog>,
) -> Result<(), LoadError> {
    for language in languages {
        if catalogs.contains_key(language) {
            continue;
        }
        let location = source.location(language);
        let document = match source.fetch(language) {
            Ok(document) => document,
            Err(err) if err.is_recoverable() => {
                warn!(%language, %location, reason = %err, "cannot read catalog, skipping language");
                continue;
            }
            Err(err) => {
                error!(%language, %location, "error reading catalog: {err}");
                return Err(LoadError::Fetch {
                    language: language.clone(),
                    location,
                    source: err,
                });
            }
        };
        let catalog = Catalog::from_json(&document).map_err(|source| {
            error!(%language, %location, "error parsing catalog: {source}");
            LoadError::Parse {
                language: language.clone(),
                location: location.clone(),
                source,
            }
        })?;
        debug!(%language, %location, entries = catalog.len(), "loaded catalog");
        catalogs.insert(language.clone(), catalog);
    }
    Ok(())
}
