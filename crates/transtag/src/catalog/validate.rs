//! Validation of a translated catalog against its source catalog.

use crate::catalog::error::CatalogWarning;
use crate::catalog::store::Catalog;
use crate::percent::placeholders;
use crate::types::LanguageCode;

/// Compare a translated catalog against the source catalog.
///
/// Reports source keys without translation, translated keys the source does
/// not define, and translations of block keys (keys containing `%(name)s` or
/// `%%`) whose placeholders differ from the key's or which are not valid
/// format strings. Those last two would make block translation fall back to
/// the untranslated text at render time.
pub fn compare_catalogs(
    source: &Catalog,
    target: &Catalog,
    language: &LanguageCode,
) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();

    for key in source.keys() {
        if !target.contains_key(key) {
            warnings.push(CatalogWarning::MissingKey {
                key: key.to_string(),
                language: language.clone(),
            });
        }
    }

    for (key, translated) in target.iter() {
        if !source.contains_key(key) {
            warnings.push(CatalogWarning::UnknownKey {
                key: key.to_string(),
                language: language.clone(),
            });
            continue;
        }
        if let Some(warning) = check_format(key, translated, language) {
            warnings.push(warning);
        }
    }

    warnings
}

/// Check that a block key's translation keeps the key's placeholders.
fn check_format(key: &str, translated: &str, language: &LanguageCode) -> Option<CatalogWarning> {
    if !key.contains("%(") && !key.contains("%%") {
        return None;
    }
    let Ok(mut expected) = placeholders(key) else {
        return None;
    };
    let mut found = match placeholders(translated) {
        Ok(found) => found,
        Err(e) => {
            return Some(CatalogWarning::MalformedFormat {
                key: key.to_string(),
                language: language.clone(),
                message: e.to_string(),
            });
        }
    };
    expected.sort();
    found.sort();
    (expected != found).then(|| CatalogWarning::PlaceholderMismatch {
        key: key.to_string(),
        language: language.clone(),
        expected,
        found,
    })
}
