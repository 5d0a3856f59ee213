//! Rendering of templates and translation tags.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::catalog::{CatalogSource, LoadError, TranslationStore};
use crate::parser::{BlockPart, Expression, Node, ParsedTag, Template};
use crate::percent::{self, block_message};
use crate::render::context::RenderContext;
use crate::render::error::RenderError;
use crate::settings::Settings;
use crate::types::{LanguageCode, Value};

/// Renders templates and translation tags against a translation store.
///
/// The renderer borrows everything it needs: the settings (for the
/// configured language set), the store, and the source the store is
/// populated from on first use.
///
/// # Example
///
/// ```
/// use transtag::parser::parse_template;
/// use transtag::{LanguageCode, MemorySource, RenderContext, Renderer, Settings, TranslationStore};
///
/// let fr = LanguageCode::new("fr").unwrap();
/// let settings = Settings::builder()
///     .language_code(fr.clone())
///     .languages(vec![transtag::LanguageEntry::new(fr.clone(), "Français")])
///     .build();
/// let source = MemorySource::new().with(fr, r#"{"hello": "Bonjour"}"#);
/// let store = TranslationStore::new();
/// let renderer = Renderer::new(&settings, &store, &source);
///
/// let template = parse_template(r#"{% trans "hello" %}, {{ name }}!"#).unwrap();
/// let mut ctx = RenderContext::from_settings(&settings);
/// ctx.set("name", "Sam");
///
/// assert_eq!(renderer.render(&template, &mut ctx).unwrap(), "Bonjour, Sam!");
/// ```
pub struct Renderer<'a> {
    settings: &'a Settings,
    store: &'a TranslationStore,
    source: &'a dyn CatalogSource,
}

impl<'a> Renderer<'a> {
    pub fn new(
        settings: &'a Settings,
        store: &'a TranslationStore,
        source: &'a dyn CatalogSource,
    ) -> Self {
        Self {
            settings,
            store,
            source,
        }
    }

    pub fn store(&self) -> &TranslationStore {
        self.store
    }

    /// Render a whole template.
    pub fn render(&self, template: &Template, ctx: &mut RenderContext) -> Result<String, RenderError> {
        let mut output = String::new();
        for node in &template.nodes {
            output.push_str(&self.render_node(node, ctx)?);
        }
        Ok(output)
    }

    /// Render a single node.
    pub fn render_node(&self, node: &Node, ctx: &mut RenderContext) -> Result<String, RenderError> {
        match node {
            Node::Text(text) => Ok(text.clone()),
            Node::Variable(name) => Ok(ctx.render_variable(name)),
            Node::Tag(tag) => self.render_tag(tag, ctx),
        }
    }

    /// Render a translation tag.
    ///
    /// Tags with an output variable bind into `ctx` and return empty text.
    pub fn render_tag(&self, tag: &ParsedTag, ctx: &mut RenderContext) -> Result<String, RenderError> {
        match tag {
            ParsedTag::CurrentLanguage { output_variable } => {
                let language = Value::from(ctx.language().map(LanguageCode::to_string));
                ctx.set(output_variable.as_str(), language);
                Ok(String::new())
            }
            ParsedTag::Translate {
                source,
                output_variable,
            } => self.render_translate(source, output_variable.as_deref(), ctx),
            ParsedTag::BlockTranslate { body } => self.render_block_translate(body, ctx, false),
        }
    }

    /// Load the store for the configured languages if it is not loaded yet.
    pub fn ensure_loaded(&self) -> Result<(), LoadError> {
        self.store
            .ensure_loaded(self.source, &self.settings.language_codes())
    }

    /// Render `{% trans %}`.
    ///
    /// A missing translation is logged and yields `Value::Null`.
    fn render_translate(
        &self,
        source: &Expression,
        output_variable: Option<&str>,
        ctx: &mut RenderContext,
    ) -> Result<String, RenderError> {
        self.ensure_loaded()?;

        let key = match source {
            Expression::Literal(text) => Some(text.clone()),
            Expression::Variable(name) => ctx
                .get(name)
                .filter(|value| !value.is_null())
                .map(Value::to_string),
        };
        let translation = match (ctx.language(), key.as_deref()) {
            (Some(language), Some(key)) => self.store.lookup(language, key),
            _ => None,
        };

        let value = match translation.filter(|text| !text.is_empty()) {
            Some(text) => Value::String(text),
            None => {
                self.warn_missing(ctx.language(), source, key.as_deref());
                Value::Null
            }
        };

        match output_variable {
            Some(name) => {
                ctx.set(name, value);
                Ok(String::new())
            }
            None => Ok(value.to_string()),
        }
    }

    fn warn_missing(&self, language: Option<&LanguageCode>, source: &Expression, key: Option<&str>) {
        let Some(language) = language else {
            warn!(?source, "no translation: neutral language is active");
            return;
        };
        let Some(key) = key else {
            warn!(%language, ?source, "no translation: message variable is not set");
            return;
        };
        let suggestions = self.store.suggestions(language, key);
        if suggestions.is_empty() {
            warn!(%language, key, "no translation");
        } else {
            warn!(%language, key, ?suggestions, "no translation");
        }
    }

    /// Render `{% blocktrans %}`.
    ///
    /// The compiled format string is the catalog key. If the translation
    /// cannot be formatted with the placeholder values, rendering is retried
    /// once in the neutral language; a second failure is an error.
    fn render_block_translate(
        &self,
        body: &[BlockPart],
        ctx: &mut RenderContext,
        nested: bool,
    ) -> Result<String, RenderError> {
        self.ensure_loaded()?;

        let message = block_message(body);
        let translated = self.gettext(ctx.language(), &message.format);
        let values: BTreeMap<String, String> = message
            .placeholders
            .iter()
            .map(|name| (name.clone(), ctx.render_variable(name)))
            .collect();

        match percent::format(&translated, &values) {
            Ok(result) => Ok(result),
            Err(source) if nested => Err(RenderError::Syntax {
                message: translated,
                values,
                source,
            }),
            Err(err) => {
                warn!(
                    language = ?ctx.language().map(LanguageCode::as_str),
                    key = %message.format,
                    reason = %err,
                    "cannot format block translation, rendering untranslated text"
                );
                ctx.override_language(None, |ctx| self.render_block_translate(body, ctx, true))
            }
        }
    }

    /// Translate a message key, falling back to the key itself.
    ///
    /// The neutral language has no catalog, so every key is its own
    /// translation. An empty translation counts as missing.
    fn gettext(&self, language: Option<&LanguageCode>, key: &str) -> String {
        let Some(language) = language else {
            return key.to_string();
        };
        match self.store.lookup(language, key) {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!(%language, key, "no block translation, using message key");
                key.to_string()
            }
        }
    }
}
