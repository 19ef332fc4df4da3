//! Lazily loaded dictionaries
//!
//! A [`LazyTranslator`] starts from a partial (possibly empty) dictionary and
//! fetches each missing leaf through a caller-supplied [`PhraseLoader`] the
//! first time a selector needs it. Only the exact leaf a selector walks to is
//! requested; sibling keys are never over-fetched.
//!
//! # Example
//!
//! ```
//! use typed_locale::dictionary;
//! use typed_locale::lazy::{LazyTranslator, MockLoader, MockMode};
//!
//! # let runtime = tokio::runtime::Runtime::new().unwrap();
//! # runtime.block_on(async {
//! let loader = MockLoader::new(MockMode::Dictionary(dictionary! { "hello" => "Hello" }));
//! let translator = LazyTranslator::new(loader);
//!
//! assert_eq!(translator.translate(|l| l.at("hello")).await.unwrap(), "Hello");
//! assert_eq!(translator.translate(|l| l.at("hello")).await.unwrap(), "Hello");
//! assert_eq!(translator.loader().call_count(), 1);
//! # });
//! ```

pub mod loader;
pub mod mock;
pub mod translator;

pub use loader::{FnLoader, PhraseLoader, loader_fn};
pub use mock::{MockLoader, MockMode};
pub use translator::LazyTranslator;
