use std::path::PathBuf;

use thiserror::Error;

/// Error types surfaced by typed-locale.
///
/// Lookups never produce these: a missing or malformed translation degrades
/// to an empty string. They come from construction (dictionaries, locales),
/// token decoding and the lazy loader.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// A string that was expected to be a deferred translation token is not one
    #[error("invalid deferred translation token: {0}")]
    InvalidToken(String),

    /// The lazy loader failed to fetch a phrase
    #[error("failed to load phrase `{path}`: {reason}")]
    Load { path: String, reason: String },

    /// A catalog was asked for a translator but has no dictionary for its default locale
    #[error("no dictionary registered for default locale `{0}`")]
    UnknownLocale(String),

    /// A locale tag is not a valid BCP-47 identifier
    #[error("invalid locale `{tag}`: {reason}")]
    InvalidLocale { tag: String, reason: String },

    /// A dictionary source has the wrong structure
    #[error("invalid dictionary at `{path}`: {reason}")]
    InvalidDictionary { path: String, reason: String },

    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON from `{}`: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for typed-locale operations
pub type LocaleResult<T> = Result<T, LocaleError>;
