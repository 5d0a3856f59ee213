//! Template translation tags backed by per-language JSON catalogs.
//!
//! Templates use three tags:
//!
//! - `{% get_current_language as VAR %}` binds the active language code
//! - `{% trans "key" [as VAR] %}` looks a message key up in the active
//!   language's catalog
//! - `{% blocktrans %}Hi {{ name }}!{% endblocktrans %}` translates a block
//!   whose untranslated text (`Hi %(name)s!`) is the catalog key
//!
//! Catalogs are flat JSON objects (`{code}.json`), fetched once through a
//! [`CatalogSource`] into a [`TranslationStore`] on first render.

pub mod catalog;
#[cfg(feature = "global-store")]
pub mod global;
pub mod parser;
pub mod percent;
pub mod render;
mod settings;
pub mod types;

#[cfg(feature = "http")]
pub use catalog::HttpSource;
pub use catalog::{
    CachePolicy, Catalog, CatalogSource, CatalogWarning, DirectorySource, FetchError, LoadError,
    MemorySource, TranslationStore, compute_suggestions,
};
pub use parser::{ParseError, ParsedTag, Template, parse_template};
pub use render::{RenderContext, RenderError, Renderer};
pub use settings::{Settings, SettingsError};
pub use types::{InvalidLanguageCode, LanguageCode, LanguageEntry, Value};

/// Creates a `HashMap<String, Value>` of template variables.
///
/// Values are converted via `Into<Value>`, so integers, strings and
/// booleans can be passed directly.
///
/// # Example
///
/// ```
/// use transtag::{vars, Value};
///
/// let v = vars! { "count" => 3, "name" => "Sam" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["count"].as_number(), Some(3));
/// assert_eq!(v["name"].as_string(), Some("Sam"));
/// ```
#[macro_export]
macro_rules! vars {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
