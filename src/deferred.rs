//! Deferred translation tokens.
//!
//! A selector can be recorded before the active locale is known (for example
//! while a validation schema is being built) and rendered later against any
//! dictionary. The token is self-contained:
//!
//! ```text
//! __TRANSLATION_MESSAGE__:{"path":["passwordTooShort"],"variables":{"min":8}}
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LocaleError, LocaleResult};
use crate::generator::{Generator, IntoResolution, Resolution};
use crate::path::Path;
use crate::translator::Translate;
use crate::variables::Variables;

/// Marker that distinguishes a deferred token from ordinary text
pub const TOKEN_PREFIX: &str = "__TRANSLATION_MESSAGE__:";

/// A replayable selector, shareable across threads
pub type TranslationOption = Arc<dyn Fn(Generator) -> Resolution + Send + Sync>;

/// The payload of a deferred token: which leaf, and with which variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredMessage {
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Variables>,
}

impl DeferredMessage {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(format!("{}{}", TOKEN_PREFIX, serde_json::to_string(self)?))
    }

    pub fn decode(token: &str) -> LocaleResult<Self> {
        let json = token
            .strip_prefix(TOKEN_PREFIX)
            .ok_or_else(|| LocaleError::InvalidToken("missing token prefix".to_string()))?;
        serde_json::from_str(json).map_err(|err| LocaleError::InvalidToken(err.to_string()))
    }

    /// Replay this message against a real generator.
    ///
    /// An empty path resolves to the empty string.
    pub fn select(&self, generator: Generator) -> Resolution {
        if self.path.is_empty() {
            return Ok(String::new());
        }
        generator
            .at_path(self.path.iter().cloned())
            .with(self.variables.clone().unwrap_or_default())
    }

    pub fn into_option(self) -> TranslationOption {
        Arc::new(move |generator| self.select(generator))
    }
}

/// `true` when `message` carries the deferred-token marker. Does not parse.
pub fn is_deferred(message: &str) -> bool {
    message.starts_with(TOKEN_PREFIX)
}

/// Record `selector` into a token without any dictionary.
///
/// A selector that ignores the generator and returns its own text yields
/// that text unchanged.
pub fn defer<F, R>(selector: F) -> String
where
    F: FnOnce(Generator) -> R,
    R: IntoResolution,
{
    match selector(Generator::recording()).into_resolution() {
        Ok(token) => token,
        Err(err) => {
            warn!(%err, "selector could not be recorded");
            String::new()
        }
    }
}

/// Decode a token into a replayable selector
pub fn decode(token: &str) -> LocaleResult<TranslationOption> {
    DeferredMessage::decode(token).map(DeferredMessage::into_option)
}

/// Path a selector walks, found by running it against a recording generator.
pub fn extract_path<F, R>(selector: &F) -> Path
where
    F: Fn(Generator) -> R + ?Sized,
    R: IntoResolution,
{
    selector(Generator::recording())
        .into_resolution()
        .ok()
        .and_then(|token| DeferredMessage::decode(&token).ok())
        .map(|message| message.path)
        .unwrap_or_default()
}

/// Renders deferred tokens through a translator.
#[derive(Debug, Clone)]
pub struct DeferredTranslator<T> {
    translator: T,
}

impl<T: Translate> DeferredTranslator<T> {
    pub fn new(translator: T) -> Self {
        DeferredTranslator { translator }
    }

    /// Render `message` if it is a token; anything else comes back unchanged.
    pub fn render(&self, message: &str) -> String {
        if !is_deferred(message) {
            return message.to_string();
        }
        match DeferredMessage::decode(message) {
            Ok(deferred) => self
                .translator
                .translate_with(&|generator| deferred.select(generator)),
            Err(err) => {
                warn!(%err, "malformed deferred translation, rendering as plain text");
                message.to_string()
            }
        }
    }
}
