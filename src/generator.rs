//! Selector evaluation over a dictionary.
//!
//! A [`Generator`] is a cursor that mirrors the shape of a [`Dictionary`]:
//! [`Generator::at`] descends one key, [`Generator::with`] invokes a leaf with
//! variables and [`Generator::text`] reads a leaf directly. Selectors are plain
//! closures over it:
//!
//! ```
//! use typed_locale::{dictionary, vars, Generator};
//!
//! let en = dictionary! { "nested" => { "hello" => "Hello, {{name}}" } };
//! let greeting = Generator::new(&en)
//!     .at("nested")
//!     .at("hello")
//!     .with(vars! { "name" => "Jo" });
//! assert_eq!(greeting.unwrap(), "Hello, Jo");
//! ```
//!
//! The same closure can run against a recording generator, which produces a
//! deferred translation token instead of text.

use thiserror::Error;
use tracing::trace;

use crate::deferred::DeferredMessage;
use crate::dictionary::{Dictionary, Template};
use crate::path::{Path, PathSegment, display_path};
use crate::variables::Variables;

/// Why a selector could not produce a phrase.
///
/// Always recovered by translators; never surfaced to their callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("no phrase at `{0}`")]
    NotFound(String),

    #[error("`{0}` is a branch, not a phrase")]
    NotALeaf(String),

    #[error("failed to encode deferred translation: {0}")]
    Encoding(String),
}

/// Outcome of evaluating a selector
pub type Resolution = Result<String, TraversalError>;

#[derive(Debug, Clone)]
enum Cursor {
    Node(Template),
    Missing,
    Recording,
}

/// Cursor over a dictionary (or a recorder) used to evaluate selectors.
#[derive(Debug, Clone)]
pub struct Generator {
    path: Path,
    cursor: Cursor,
}

impl Generator {
    /// Generator over a real dictionary
    pub fn new(dictionary: &Dictionary) -> Self {
        Generator {
            path: Vec::new(),
            cursor: Cursor::Node(Template::Branch(dictionary.clone())),
        }
    }

    /// Generator with no dictionary behind it; leaves yield deferred tokens
    pub fn recording() -> Self {
        Generator {
            path: Vec::new(),
            cursor: Cursor::Recording,
        }
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.cursor, Cursor::Recording)
    }

    /// The template under the cursor, if it exists
    pub fn template(&self) -> Option<&Template> {
        match &self.cursor {
            Cursor::Node(template) => Some(template),
            Cursor::Missing | Cursor::Recording => None,
        }
    }

    /// Descend into `key`.
    ///
    /// Never fails: an absent key is reported when the leaf is invoked.
    pub fn at(mut self, key: impl Into<PathSegment>) -> Self {
        let key = key.into();
        self.cursor = match self.cursor {
            Cursor::Node(Template::Branch(dictionary)) => dictionary
                .get(&key.as_key())
                .cloned()
                .map_or(Cursor::Missing, Cursor::Node),
            Cursor::Node(_) | Cursor::Missing => Cursor::Missing,
            Cursor::Recording => Cursor::Recording,
        };
        self.path.push(key);
        self
    }

    /// Descend through every segment of `path`
    pub fn at_path<I, S>(self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        path.into_iter().fold(self, |generator, key| generator.at(key))
    }

    /// Invoke the leaf with `variables`.
    pub fn with(self, variables: impl Into<Variables>) -> Resolution {
        self.invoke(Some(variables.into()))
    }

    /// Read the leaf without variables; placeholders stay verbatim.
    pub fn text(self) -> Resolution {
        self.invoke(None)
    }

    fn invoke(self, variables: Option<Variables>) -> Resolution {
        match self.cursor {
            Cursor::Recording => DeferredMessage {
                path: self.path,
                variables,
            }
            .encode()
            .map_err(|err| TraversalError::Encoding(err.to_string())),
            Cursor::Missing => Err(TraversalError::NotFound(display_path(&self.path))),
            Cursor::Node(Template::Branch(_)) => {
                Err(TraversalError::NotALeaf(display_path(&self.path)))
            }
            Cursor::Node(template) => {
                if let Some(variables) = &variables {
                    let missing: Vec<String> = template
                        .params()
                        .into_iter()
                        .filter(|name| !variables.contains(name))
                        .collect();
                    if !missing.is_empty() {
                        trace!(
                            path = %display_path(&self.path),
                            ?missing,
                            "phrase invoked without some of its variables"
                        );
                    }
                }
                template
                    .render(variables.as_ref())
                    .ok_or_else(|| TraversalError::NotALeaf(display_path(&self.path)))
            }
        }
    }
}

/// What a selector may return.
///
/// Returning a [`Generator`] means "invoke it with no arguments".
pub trait IntoResolution {
    fn into_resolution(self) -> Resolution;
}

impl IntoResolution for Resolution {
    fn into_resolution(self) -> Resolution {
        self
    }
}

impl IntoResolution for Generator {
    fn into_resolution(self) -> Resolution {
        self.text()
    }
}

impl IntoResolution for String {
    fn into_resolution(self) -> Resolution {
        Ok(self)
    }
}

impl IntoResolution for &str {
    fn into_resolution(self) -> Resolution {
        Ok(self.to_string())
    }
}
