//! Typed phrase dictionaries with `{{variable}}` interpolation.
//!
//! A [`Dictionary`] is a nested tree of message templates for one locale.
//! Messages are looked up with *selectors*, closures that walk a
//! [`Generator`] to one leaf and optionally supply variables:
//!
//! ```
//! use typed_locale::{Catalog, Translate, dictionary, plural, vars};
//!
//! let en = dictionary! {
//!     "hello" => "Hello, {{name}}",
//!     "inbox" => {
//!         "messages" => plural()
//!             .none("No messages")
//!             .one("1 message")
//!             .other("{{count}} messages"),
//!     },
//! };
//! let fr = dictionary! { "hello" => "Bonjour, {{name}}" };
//!
//! let mut catalog = Catalog::new();
//! catalog.with_dictionary("en", en).with_dictionary("fr", fr);
//!
//! let translate = catalog.translator("fr").unwrap();
//! assert_eq!(translate.translate(|l| l.at("hello").with(vars! { "name" => "Jo" })), "Bonjour, Jo");
//! // Missing in French, resolved from the default locale
//! assert_eq!(
//!     translate.translate(|l| l.at("inbox").at("messages").with(vars! { "count" => 3 })),
//!     "3 messages"
//! );
//! // Never fails: unknown paths give an empty string
//! assert_eq!(translate.translate(|l| l.at("nope")), "");
//! ```
//!
//! Selectors can also be recorded into portable tokens with [`defer`] and
//! rendered later in any locale, which is how localized messages reach
//! validation errors (see [`validation`]). The [`lazy`] module loads leaves
//! on demand from an async source.

pub mod deferred;
pub mod dictionary;
pub mod error;
pub mod generator;
pub mod lazy;
pub mod loader;
pub mod locale;
pub mod path;
pub mod phrase;
pub mod scope;
pub mod select;
pub mod translator;
pub mod validation;
pub mod variables;

pub use deferred::{
    DeferredMessage, DeferredTranslator, TOKEN_PREFIX, TranslationOption, decode, defer,
    extract_path, is_deferred,
};
pub use dictionary::{Dictionary, Template};
pub use error::{LocaleError, LocaleResult};
pub use generator::{Generator, IntoResolution, Resolution, TraversalError};
pub use loader::{load_all_dictionaries_from_dir, load_dictionary_from_file, parse_dictionary};
pub use locale::{normalize_locale, validate_locale};
pub use path::{Path, PathSegment, display_path, path_of};
pub use phrase::{Phrase, build_phrase, placeholders};
pub use scope::{Scoped, scope};
pub use select::{PluralBuilder, SelectBuilder, Selection, SelectionKind, plural, select};
pub use translator::{Catalog, Translate, Translator};
pub use validation::{
    IssueOrder, IssueRenderer, SplitIssues, TranslationIssue, ValidationIssue, ValidationReport,
    render_issues, split_issues,
};
pub use variables::{VarValue, Variables};
