//! Locale identifiers for catalogs and dictionary files.
//!
//! Tags are canonicalized with ICU4X so that `EN-us` and `en-US` address the
//! same dictionary.

use icu_locale::Locale;
use tracing::warn;

use crate::error::{LocaleError, LocaleResult};

/// Canonicalize a locale tag.
///
/// Tags that are not valid BCP-47 are still usable as dictionary names: they
/// are trimmed and lower-cased instead.
///
/// # Example
///
/// ```
/// use typed_locale::normalize_locale;
///
/// assert_eq!(normalize_locale("EN-us"), "en-US");
/// assert_eq!(normalize_locale("zh-hans"), "zh-Hans");
/// ```
pub fn normalize_locale(tag: &str) -> String {
    match validate_locale(tag) {
        Ok(locale) => locale.to_string(),
        Err(err) => {
            let fallback = tag.trim().to_lowercase();
            warn!(%err, locale = %fallback, "using non-BCP-47 locale name as is");
            fallback
        }
    }
}

/// Parse `tag` as a BCP-47 locale.
///
/// # Errors
///
/// `LocaleError::InvalidLocale` when the tag is empty or does not parse.
pub fn validate_locale(tag: &str) -> LocaleResult<Locale> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(LocaleError::InvalidLocale {
            tag: tag.to_string(),
            reason: "locale tag is empty".to_string(),
        });
    }
    trimmed
        .parse::<Locale>()
        .map_err(|err| LocaleError::InvalidLocale {
            tag: tag.to_string(),
            reason: err.to_string(),
        })
}
