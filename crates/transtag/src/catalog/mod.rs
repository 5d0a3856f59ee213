//! Translation catalogs: sources, the store, and validation.
//!
//! Catalogs are flat JSON objects mapping message keys to translated text,
//! one per language. A [`CatalogSource`] fetches the raw documents and the
//! [`TranslationStore`] parses and caches them.

mod error;
mod source;
mod store;
mod suggest;
mod validate;

pub use error::{CatalogWarning, FetchError, LoadError};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{CatalogSource, DirectorySource, MemorySource};
pub use store::{CachePolicy, Catalog, TranslationStore};
pub use suggest::compute_suggestions;
pub use validate::compare_catalogs;
