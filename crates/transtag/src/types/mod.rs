mod language;
mod value;

pub use language::{InvalidLanguageCode, LanguageCode, LanguageEntry};
pub use value::Value;
