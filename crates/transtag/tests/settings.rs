//! Integration tests for settings.

use std::fs;

use tempfile::TempDir;
use transtag::{CachePolicy, LanguageCode, LanguageEntry, Settings, SettingsError};

fn lang(code: &str) -> LanguageCode {
    LanguageCode::new(code).unwrap()
}

#[test]
fn defaults() {
    let settings = Settings::default();
    assert_eq!(settings.language_code, lang("en"));
    assert!(settings.languages.is_empty());
    assert_eq!(settings.static_url, "/static/");
    assert_eq!(settings.string_if_invalid, "");
    assert!(settings.autoescape);
    assert_eq!(settings.cache_policy, CachePolicy::LoadOnce);
}

#[test]
fn empty_document_uses_defaults() {
    assert_eq!(Settings::from_json_str("{}").unwrap(), Settings::default());
}

#[test]
fn languages_accept_objects_and_pairs() {
    let settings = Settings::from_json_str(
        r#"{"languages": [{"code": "fr", "name": "Français"}, ["nl", "Nederlands"]]}"#,
    )
    .unwrap();
    assert_eq!(
        settings.languages,
        vec![
            LanguageEntry::new(lang("fr"), "Français"),
            LanguageEntry::new(lang("nl"), "Nederlands"),
        ]
    );
    assert_eq!(settings.language_codes(), vec![lang("fr"), lang("nl")]);
    assert_eq!(settings.language_name(&lang("nl")), Some("Nederlands"));
    assert_eq!(settings.language_name(&lang("de")), None);
}

#[test]
fn catalog_path_uses_static_url() {
    let settings = Settings::builder().static_url("/assets/").build();
    assert_eq!(settings.catalog_path(&lang("fr")), "/assets/lang/fr.json");
}

#[test]
fn invalid_language_code_is_rejected() {
    let err = Settings::from_json_str(r#"{"language_code": "not a code"}"#).unwrap_err();
    assert!(matches!(err, SettingsError::Json { .. }));
}

#[test]
fn reads_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{"language_code": "fr", "string_if_invalid": "?%s?", "autoescape": false}"#,
    )
    .unwrap();

    let settings = Settings::from_path(&path).unwrap();
    assert_eq!(settings.language_code, lang("fr"));
    assert_eq!(settings.string_if_invalid, "?%s?");
    assert!(!settings.autoescape);
}

#[test]
fn missing_settings_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }));
}
