//! Rendering context: variables plus the ambient language settings.

use std::collections::HashMap;
use std::mem;

use bon::Builder;

use crate::render::escape::escape_html;
use crate::settings::Settings;
use crate::types::{LanguageCode, Value};

/// The variables and ambient settings a template is rendered with.
///
/// The context tracks:
/// - Variables, readable by `{{ name }}` and block placeholders, writable by
///   `as VAR` bindings
/// - The active language (`None` is the neutral language, which has no
///   catalog)
/// - The marker rendered in place of missing variables
/// - Whether rendered values are HTML-escaped
///
/// Variable names are looked up verbatim; `user.name` is a single key.
///
/// # Example
///
/// ```
/// use transtag::{LanguageCode, RenderContext, Value};
///
/// let mut ctx = RenderContext::builder()
///     .language(LanguageCode::new("nl").unwrap())
///     .string_if_invalid("[missing %s]")
///     .build();
/// ctx.set("name", "Sam");
///
/// assert_eq!(ctx.get("name"), Some(&Value::from("Sam")));
/// assert_eq!(ctx.invalid_value("title"), "[missing title]");
/// assert_eq!(ctx.language().map(LanguageCode::as_str), Some("nl"));
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct RenderContext {
    /// Variables available to the template.
    #[builder(default)]
    variables: HashMap<String, Value>,

    /// Active language; `None` is the neutral language.
    language: Option<LanguageCode>,

    /// Rendered in place of missing variables; `%s` is replaced by the name.
    #[builder(default)]
    string_if_invalid: String,

    /// HTML-escape values that are not marked safe.
    #[builder(default = true)]
    autoescape: bool,
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext::builder().build()
    }
}

impl RenderContext {
    /// Create an empty context in the neutral language.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context using the default language, invalid-variable
    /// marker and autoescape flag of `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        RenderContext::builder()
            .language(settings.language_code.clone())
            .string_if_invalid(settings.string_if_invalid.clone())
            .autoescape(settings.autoescape)
            .build()
    }

    // =========================================================================
    // Variables
    // =========================================================================

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Bind a variable, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Remove a variable, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    // =========================================================================
    // Language
    // =========================================================================

    /// The active language, or `None` for the neutral language.
    pub fn language(&self) -> Option<&LanguageCode> {
        self.language.as_ref()
    }

    pub fn set_language(&mut self, language: Option<LanguageCode>) {
        self.language = language;
    }

    /// Run `f` with the active language temporarily replaced.
    ///
    /// The previous language is restored afterwards, whatever `f` returns.
    pub fn override_language<T>(
        &mut self,
        language: Option<LanguageCode>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let previous = mem::replace(&mut self.language, language);
        let result = f(self);
        self.language = previous;
        result
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn string_if_invalid(&self) -> &str {
        &self.string_if_invalid
    }

    pub fn autoescape(&self) -> bool {
        self.autoescape
    }

    /// The marker for a missing variable, with `%s` replaced by its name.
    pub fn invalid_value(&self, name: &str) -> String {
        if self.string_if_invalid.contains("%s") {
            self.string_if_invalid.replacen("%s", name, 1)
        } else {
            self.string_if_invalid.clone()
        }
    }

    /// Render a value as text, escaping it under autoescape unless it is safe.
    pub fn render_value(&self, value: &Value) -> String {
        let text = value.to_string();
        if self.autoescape && !value.is_safe() {
            escape_html(&text)
        } else {
            text
        }
    }

    /// Render a variable by name, or the invalid marker when it is missing.
    pub fn render_variable(&self, name: &str) -> String {
        match self.variables.get(name) {
            Some(value) => self.render_value(value),
            None => self.render_value(&Value::String(self.invalid_value(name))),
        }
    }
}
