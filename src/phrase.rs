//! Double-brace phrase building: `Hello {{name}}`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::variables::Variables;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is a valid regex")
});

/// Substitute every `{{name}}` in `template` with its value from `variables`.
///
/// - Without variables the template is returned unchanged.
/// - Placeholders with no matching variable are left verbatim.
/// - Variables that no placeholder references are ignored.
/// - Repeated placeholders are all substituted.
pub fn build_phrase(template: &str, variables: Option<&Variables>) -> String {
    let Some(variables) = variables else {
        return template.to_string();
    };

    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match variables.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Placeholder names referenced by `template`
pub fn placeholders(template: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// A literal template with its placeholder set parsed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    text: String,
    params: BTreeSet<String>,
}

impl Phrase {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let params = placeholders(&text);
        Phrase { text, params }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &BTreeSet<String> {
        &self.params
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// Placeholder names of this phrase that `variables` does not supply
    pub fn missing_params<'a>(&'a self, variables: &Variables) -> Vec<&'a str> {
        self.params
            .iter()
            .filter(|name| !variables.contains(name))
            .map(String::as_str)
            .collect()
    }

    pub fn build(&self, variables: Option<&Variables>) -> String {
        if !self.has_params() {
            return self.text.clone();
        }
        build_phrase(&self.text, variables)
    }
}

impl From<&str> for Phrase {
    fn from(text: &str) -> Self {
        Phrase::new(text)
    }
}

impl From<String> for Phrase {
    fn from(text: String) -> Self {
        Phrase::new(text)
    }
}

impl std::fmt::Display for Phrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
