//! Integration tests for the translation store and catalog sources.

use std::cell::RefCell;
use std::fs;

use tempfile::TempDir;
use transtag::{
    CachePolicy, Catalog, CatalogSource, DirectorySource, FetchError, LanguageCode, LoadError,
    MemorySource, TranslationStore,
};

fn lang(code: &str) -> LanguageCode {
    LanguageCode::new(code).unwrap()
}

fn sample_source() -> MemorySource {
    MemorySource::new()
        .with(lang("en"), r#"{"hello": "Hello", "bye": "Goodbye"}"#)
        .with(lang("fr"), r#"{"hello": "Bonjour", "bye": "Au revoir"}"#)
        .with(lang("nl"), r#"{"hello": "Hallo"}"#)
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn loads_every_configured_language() {
    let store = TranslationStore::new();
    let languages = [lang("en"), lang("fr"), lang("nl")];
    store.ensure_loaded(&sample_source(), &languages).unwrap();

    assert_eq!(store.lookup(&lang("en"), "hello").as_deref(), Some("Hello"));
    assert_eq!(store.lookup(&lang("en"), "bye").as_deref(), Some("Goodbye"));
    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Bonjour"));
    assert_eq!(store.lookup(&lang("fr"), "bye").as_deref(), Some("Au revoir"));
    assert_eq!(store.lookup(&lang("nl"), "hello").as_deref(), Some("Hallo"));
    assert_eq!(store.languages(), vec![lang("en"), lang("fr"), lang("nl")]);
}

#[test]
fn lookup_miss_is_none() {
    let store = TranslationStore::new();
    store.ensure_loaded(&sample_source(), &[lang("nl")]).unwrap();

    assert_eq!(store.lookup(&lang("nl"), "bye"), None);
    assert_eq!(store.lookup(&lang("de"), "hello"), None);
}

#[test]
fn only_configured_languages_are_loaded() {
    let store = TranslationStore::new();
    store.ensure_loaded(&sample_source(), &[lang("fr")]).unwrap();

    assert_eq!(store.lookup(&lang("en"), "hello"), None);
    assert_eq!(store.languages(), vec![lang("fr")]);
}

#[test]
fn ensure_loaded_is_idempotent() {
    let store = TranslationStore::new();
    let languages = [lang("fr")];
    store.ensure_loaded(&sample_source(), &languages).unwrap();

    let other = MemorySource::new().with(lang("fr"), r#"{"hello": "Salut"}"#);
    store.ensure_loaded(&other, &languages).unwrap();

    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Bonjour"));
}

#[test]
fn second_load_does_not_fetch() {
    let store = TranslationStore::new();
    let calls = RefCell::new(Vec::new());
    let source = |language: &LanguageCode| -> Result<Vec<u8>, FetchError> {
        calls.borrow_mut().push(language.to_string());
        Ok(br#"{"k": "v"}"#.to_vec())
    };

    store.ensure_loaded(&source, &[lang("en"), lang("fr")]).unwrap();
    store.ensure_loaded(&source, &[lang("en"), lang("fr")]).unwrap();

    assert_eq!(*calls.borrow(), vec!["en".to_string(), "fr".to_string()]);
}

#[test]
fn duplicate_languages_are_fetched_once() {
    let store = TranslationStore::new();
    let calls = RefCell::new(0);
    let source = |_: &LanguageCode| -> Result<Vec<u8>, FetchError> {
        *calls.borrow_mut() += 1;
        Ok(br#"{"k": "v"}"#.to_vec())
    };

    store.ensure_loaded(&source, &[lang("en"), lang("en")]).unwrap();

    assert_eq!(*calls.borrow(), 1);
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn status_failure_skips_only_that_language() {
    let store = TranslationStore::new();
    let source = |language: &LanguageCode| -> Result<Vec<u8>, FetchError> {
        match language.as_str() {
            "fr" => Err(FetchError::Status {
                status: 500,
                reason: "Internal Server Error".into(),
            }),
            _ => Ok(br#"{"hello": "Hello"}"#.to_vec()),
        }
    };

    store
        .ensure_loaded(&source, &[lang("en"), lang("fr"), lang("nl")])
        .unwrap();

    assert_eq!(store.lookup(&lang("fr"), "hello"), None);
    assert_eq!(store.lookup(&lang("en"), "hello").as_deref(), Some("Hello"));
    assert_eq!(store.lookup(&lang("nl"), "hello").as_deref(), Some("Hello"));
}

#[test]
fn all_languages_skipped_leaves_store_unloaded() {
    let store = TranslationStore::new();
    store
        .ensure_loaded(&MemorySource::new(), &[lang("en")])
        .unwrap();
    assert!(!store.is_loaded());

    // An empty store fetches again on the next call.
    store.ensure_loaded(&sample_source(), &[lang("en")]).unwrap();
    assert_eq!(store.lookup(&lang("en"), "hello").as_deref(), Some("Hello"));
}

#[test]
fn malformed_catalog_aborts_the_load() {
    let store = TranslationStore::new();
    let source = MemorySource::new()
        .with(lang("en"), r#"{"hello": "Hello"}"#)
        .with(lang("fr"), r#"{"hello": "#)
        .with(lang("nl"), r#"{"hello": "Hallo"}"#);

    let err = store
        .ensure_loaded(&source, &[lang("en"), lang("fr"), lang("nl")])
        .unwrap_err();

    let LoadError::Parse {
        language, location, ..
    } = &err
    else {
        panic!("expected parse error, got {err:?}");
    };
    assert_eq!(language, &lang("fr"));
    assert_eq!(location, "<memory:fr>");

    // Languages before the malformed one stay loaded; later ones were never read.
    assert_eq!(store.lookup(&lang("en"), "hello").as_deref(), Some("Hello"));
    assert_eq!(store.lookup(&lang("nl"), "hello"), None);
}

#[test]
fn non_string_values_are_malformed() {
    let store = TranslationStore::new();
    let source = MemorySource::new().with(lang("en"), r#"{"count": 3}"#);

    let err = store.ensure_loaded(&source, &[lang("en")]).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn transport_failure_aborts_the_load() {
    let store = TranslationStore::new();
    let source = |_: &LanguageCode| -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Transport {
            message: "connection refused".into(),
        })
    };

    let err = store.ensure_loaded(&source, &[lang("en")]).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"failed to fetch '<en>' for language 'en': transport error: connection refused"
    );
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn reset_allows_reloading() {
    let store = TranslationStore::new();
    store.ensure_loaded(&sample_source(), &[lang("fr")]).unwrap();
    store.reset();
    assert!(!store.is_loaded());

    let other = MemorySource::new().with(lang("fr"), r#"{"hello": "Salut"}"#);
    store.ensure_loaded(&other, &[lang("fr")]).unwrap();
    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Salut"));
}

#[test]
fn refresh_policy_reloads_stale_catalogs() {
    let store = TranslationStore::with_policy(CachePolicy::RefreshAfter { seconds: 0 });
    store.ensure_loaded(&sample_source(), &[lang("fr")]).unwrap();

    let other = MemorySource::new().with(lang("fr"), r#"{"hello": "Salut"}"#);
    store.ensure_loaded(&other, &[lang("fr")]).unwrap();

    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Salut"));
}

#[test]
fn failed_refresh_keeps_previous_catalogs() {
    let store = TranslationStore::with_policy(CachePolicy::RefreshAfter { seconds: 0 });
    store.ensure_loaded(&sample_source(), &[lang("fr")]).unwrap();

    let unreachable = |_: &LanguageCode| -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Transport {
            message: "connection refused".into(),
        })
    };
    let err = store.ensure_loaded(&unreachable, &[lang("fr")]).unwrap_err();

    assert!(matches!(err, LoadError::Fetch { .. }));
    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Bonjour"));
}

#[test]
fn failed_refresh_retries_on_next_call() {
    let store = TranslationStore::with_policy(CachePolicy::RefreshAfter { seconds: 0 });
    store.ensure_loaded(&sample_source(), &[lang("fr")]).unwrap();

    let broken = MemorySource::new().with(lang("fr"), "not json");
    store.ensure_loaded(&broken, &[lang("fr")]).unwrap_err();
    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Bonjour"));

    let other = MemorySource::new().with(lang("fr"), r#"{"hello": "Salut"}"#);
    store.ensure_loaded(&other, &[lang("fr")]).unwrap();
    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Salut"));
}

#[test]
fn skipped_language_keeps_previous_catalog_on_refresh() {
    let store = TranslationStore::with_policy(CachePolicy::RefreshAfter { seconds: 0 });
    store
        .ensure_loaded(&sample_source(), &[lang("en"), lang("fr")])
        .unwrap();

    let partial = MemorySource::new().with(lang("en"), r#"{"hello": "Hi"}"#);
    store
        .ensure_loaded(&partial, &[lang("en"), lang("fr")])
        .unwrap();

    assert_eq!(store.lookup(&lang("en"), "hello").as_deref(), Some("Hi"));
    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Bonjour"));
}

#[test]
fn aborted_load_is_not_retried_once_a_language_is_installed() {
    let store = TranslationStore::new();
    let broken = MemorySource::new()
        .with(lang("en"), r#"{"hello": "Hello"}"#)
        .with(lang("fr"), "not json");
    let languages = [lang("en"), lang("fr"), lang("nl")];
    store.ensure_loaded(&broken, &languages).unwrap_err();

    store.ensure_loaded(&sample_source(), &languages).unwrap();

    assert_eq!(store.languages(), vec![lang("en")]);
}

#[test]
fn long_refresh_policy_keeps_catalogs() {
    let store = TranslationStore::with_policy(CachePolicy::RefreshAfter { seconds: 3600 });
    store.ensure_loaded(&sample_source(), &[lang("fr")]).unwrap();

    let other = MemorySource::new().with(lang("fr"), r#"{"hello": "Salut"}"#);
    store.ensure_loaded(&other, &[lang("fr")]).unwrap();

    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Bonjour"));
}

#[test]
fn catalog_snapshot_and_suggestions() {
    let store = TranslationStore::new();
    store.ensure_loaded(&sample_source(), &[lang("en")]).unwrap();

    let catalog = store.catalog(&lang("en")).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["bye", "hello"]);
    assert_eq!(store.suggestions(&lang("en"), "helo"), vec!["hello"]);
    assert!(store.suggestions(&lang("de"), "helo").is_empty());
}

#[test]
fn catalog_collects_from_pairs() {
    let catalog: Catalog = [("a".to_string(), "b".to_string())].into_iter().collect();
    assert_eq!(catalog.get("a"), Some("b"));
    assert!(!catalog.is_empty());
}

// =========================================================================
// Directory source
// =========================================================================

#[test]
fn directory_source_reads_json_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("fr.json"), r#"{"hello": "Bonjour"}"#).unwrap();
    let source = DirectorySource::new(dir.path());

    let store = TranslationStore::new();
    store.ensure_loaded(&source, &[lang("fr"), lang("de")]).unwrap();

    assert_eq!(store.lookup(&lang("fr"), "hello").as_deref(), Some("Bonjour"));
    assert_eq!(store.languages(), vec![lang("fr")]);
}

#[test]
fn directory_source_missing_file_is_not_found_status() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path());

    let err = source.fetch(&lang("de")).unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(err.to_string(), "404 Not Found");
    assert!(source.location(&lang("de")).ends_with("de.json"));
}
