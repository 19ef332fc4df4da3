use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::deferred::{DeferredTranslator, extract_path};
use crate::dictionary::Dictionary;
use crate::error::{LocaleError, LocaleResult};
use crate::generator::{Generator, IntoResolution, Resolution};
use crate::locale::normalize_locale;
use crate::path::{Path, display_path};
use crate::scope::Scoped;

/// Anything that can evaluate a selector into a string.
///
/// Implementations never fail: a selector that cannot be resolved yields the
/// empty string.
pub trait Translate {
    /// Evaluate `selector`; the object-safe core of the trait.
    fn translate_with(&self, selector: &dyn Fn(Generator) -> Resolution) -> String;

    /// Evaluate a selector closure.
    ///
    /// The selector may return a [`Resolution`] (from `.with(..)` or
    /// `.text()`) or the [`Generator`] itself, which is read as a leaf.
    fn translate<F, R>(&self, selector: F) -> String
    where
        Self: Sized,
        F: Fn(Generator) -> R,
        R: IntoResolution,
    {
        self.translate_with(&|generator| selector(generator).into_resolution())
    }

    /// Restrict this translator to the sub-tree selected by `narrow`
    fn scoped<N>(self, narrow: N) -> Scoped<Self, N>
    where
        Self: Sized,
        N: Fn(Generator) -> Generator,
    {
        Scoped::new(self, narrow)
    }

    /// Wrap this translator so it renders deferred tokens
    fn deferred(self) -> DeferredTranslator<Self>
    where
        Self: Sized,
    {
        DeferredTranslator::new(self)
    }
}

impl<T: Translate + ?Sized> Translate for &T {
    fn translate_with(&self, selector: &dyn Fn(Generator) -> Resolution) -> String {
        (**self).translate_with(selector)
    }
}

impl<T: Translate + ?Sized> Translate for Box<T> {
    fn translate_with(&self, selector: &dyn Fn(Generator) -> Resolution) -> String {
        (**self).translate_with(selector)
    }
}

impl<T: Translate + ?Sized> Translate for Arc<T> {
    fn translate_with(&self, selector: &dyn Fn(Generator) -> Resolution) -> String {
        (**self).translate_with(selector)
    }
}

/// Run `selector` and keep its result only when it is a non-empty string.
pub(crate) fn resolve_safely(
    selector: &dyn Fn(Generator) -> Resolution,
    generator: Generator,
) -> Option<String> {
    match selector(generator) {
        Ok(text) if !text.is_empty() => Some(text),
        Ok(_) => None,
        Err(err) => {
            debug!(%err, "selector did not resolve");
            None
        }
    }
}

#[derive(Debug, Clone)]
struct LocaleFallback {
    locale: Option<String>,
    dictionary: Dictionary,
}

/// Resolves selectors against one dictionary, optionally falling back to a
/// second (default-locale) dictionary.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Option<String>,
    dictionary: Dictionary,
    fallback: Option<LocaleFallback>,
}

impl Translator {
    /// Create a translator over a single dictionary, with no fallback
    ///
    /// # Arguments
    ///
    /// * `dictionary` - Phrases to resolve selectors against
    ///
    /// # Example
    ///
    /// ```ignore
    /// let translator = Translator::new(dictionary! { "hello" => "Hello" });
    /// assert_eq!(translator.translate(|l| l.at("hello")), "Hello");
    /// ```
    pub fn new(dictionary: Dictionary) -> Self {
        Translator {
            locale: None,
            dictionary,
            fallback: None,
        }
    }

    /// Translator that retries against `fallback` whenever `primary` yields
    /// an error or an empty string.
    ///
    /// # Arguments
    ///
    /// * `primary` - Phrases of the requested locale
    /// * `fallback` - Phrases of the default locale
    pub fn with_fallback(primary: Dictionary, fallback: Dictionary) -> Self {
        Translator {
            locale: None,
            dictionary: primary,
            fallback: Some(LocaleFallback {
                locale: None,
                dictionary: fallback,
            }),
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Generator over the primary dictionary
    pub fn generator(&self) -> Generator {
        Generator::new(&self.dictionary)
    }
}

impl Translate for Translator {
    fn translate_with(&self, selector: &dyn Fn(Generator) -> Resolution) -> String {
        if let Some(text) = resolve_safely(selector, self.generator()) {
            return text;
        }

        let Some(fallback) = &self.fallback else {
            return String::new();
        };
        match resolve_safely(selector, Generator::new(&fallback.dictionary)) {
            Some(text) => {
                debug!(
                    path = %display_path(&extract_path(selector)),
                    locale = self.locale.as_deref().unwrap_or("-"),
                    default_locale = fallback.locale.as_deref().unwrap_or("-"),
                    "resolved from default locale"
                );
                text
            }
            None => String::new(),
        }
    }
}

/// Dictionaries for every locale plus the default locale to fall back to.
#[derive(Debug, Clone)]
pub struct Catalog {
    // Keyed by normalized locale, e.g. dictionaries["en"], dictionaries["fr-FR"]
    dictionaries: BTreeMap<String, Dictionary>,
    default_locale: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog whose default locale is `en`
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut catalog = Catalog::new();
    /// catalog.with_dictionary("en", en).with_dictionary("fr", fr);
    /// ```
    pub fn new() -> Self {
        Catalog {
            dictionaries: BTreeMap::new(),
            default_locale: "en".to_string(),
        }
    }

    /// Set the locale every other locale falls back to
    ///
    /// # Arguments
    ///
    /// * `locale` - BCP-47 tag, normalized before it is stored
    ///
    /// # Example
    ///
    /// ```ignore
    /// catalog.with_default_locale("fr").with_dictionary("fr", fr);
    /// ```
    pub fn with_default_locale(&mut self, locale: &str) -> &mut Self {
        self.default_locale = normalize_locale(locale);
        self
    }

    /// The normalized default locale
    pub fn get_default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Register (or replace) the dictionary for `locale`
    ///
    /// # Arguments
    ///
    /// * `locale` - BCP-47 tag, normalized before it is stored
    /// * `dictionary` - Phrases for that locale
    ///
    /// # Example
    ///
    /// ```ignore
    /// catalog.with_dictionary("EN-us", dictionary! { "hello" => "Hi" });
    /// assert!(catalog.dictionary("en-US").is_some());
    /// ```
    pub fn with_dictionary(&mut self, locale: &str, dictionary: Dictionary) -> &mut Self {
        self.dictionaries.insert(normalize_locale(locale), dictionary);
        self
    }

    /// Dictionary registered for `locale`, if any
    pub fn dictionary(&self, locale: &str) -> Option<&Dictionary> {
        self.dictionaries.get(&normalize_locale(locale))
    }

    /// Normalized locales that have a dictionary, in sorted order
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.dictionaries.keys().map(String::as_str)
    }

    /// Translator for `locale` that falls back to the default locale.
    ///
    /// # Errors
    ///
    /// `LocaleError::UnknownLocale` if the default locale has no dictionary.
    pub fn translator(&self, locale: &str) -> LocaleResult<Translator> {
        let default_dictionary = self
            .dictionaries
            .get(&self.default_locale)
            .ok_or_else(|| LocaleError::UnknownLocale(self.default_locale.clone()))?;

        let locale = normalize_locale(locale);
        if locale == self.default_locale {
            return Ok(Translator {
                locale: Some(locale),
                dictionary: default_dictionary.clone(),
                fallback: None,
            });
        }

        let dictionary = match self.dictionaries.get(&locale) {
            Some(dictionary) => dictionary.clone(),
            None => {
                warn!(
                    %locale,
                    default_locale = %self.default_locale,
                    "no dictionary for locale, every lookup will use the default locale"
                );
                Dictionary::new()
            }
        };

        Ok(Translator {
            locale: Some(locale),
            dictionary,
            fallback: Some(LocaleFallback {
                locale: Some(self.default_locale.clone()),
                dictionary: default_dictionary.clone(),
            }),
        })
    }

    /// Leaves of the default locale that `locale` does not define
    pub fn missing_leaves(&self, locale: &str) -> LocaleResult<Vec<Path>> {
        let reference = self
            .dictionaries
            .get(&self.default_locale)
            .ok_or_else(|| LocaleError::UnknownLocale(self.default_locale.clone()))?;
        Ok(match self.dictionary(locale) {
            Some(dictionary) => dictionary.missing_leaves(reference),
            None => reference.leaf_paths(),
        })
    }
}
