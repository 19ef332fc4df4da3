//! JSON dictionary files.
//!
//! A dictionary file is a JSON object whose strings are phrases and whose
//! nested objects are branches:
//!
//! ```json
//! {
//!     "@metadata": { "authors": ["..."] },
//!     "hello": "Hello, {{name}}",
//!     "inbox": {
//!         "messages": { "@plural": true, "none": "No messages", "one": "1 message", "other": "{{count}} messages" },
//!         "fruit": { "@select": "fruit", "apple": "I like apples", "other": "I prefer {{fruit}}" }
//!     }
//! }
//! ```
//!
//! Keys starting with `@` are metadata and skipped, except `@plural` and
//! `@select` which turn their object into a selection.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::dictionary::{Dictionary, Template};
use crate::error::{LocaleError, LocaleResult};
use crate::select::{Selection, plural, select};
use crate::translator::Catalog;

const PLURAL_MARKER: &str = "@plural";
const SELECT_MARKER: &str = "@select";
const PLURAL_BRANCHES: [&str; 3] = ["none", "one", "other"];

/// Build a dictionary from a parsed JSON value.
///
/// # Errors
///
/// `LocaleError::InvalidDictionary` when the root is not an object or a
/// selection object is malformed. The error names the offending key path.
pub fn parse_dictionary(value: &Value) -> LocaleResult<Dictionary> {
    let object = value.as_object().ok_or_else(|| LocaleError::InvalidDictionary {
        path: "<root>".to_string(),
        reason: "root must be an object".to_string(),
    })?;
    parse_branch(object, "")
}

fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn parse_branch(object: &Map<String, Value>, prefix: &str) -> LocaleResult<Dictionary> {
    let mut dictionary = Dictionary::new();
    for (key, value) in object {
        if key.starts_with('@') {
            continue;
        }

        let path = child_path(prefix, key);
        match value {
            Value::String(text) => {
                dictionary.insert(key.as_str(), text.as_str());
            }
            Value::Object(child) => {
                dictionary.insert(key.as_str(), parse_node(child, &path)?);
            }
            _ => warn!(%path, "dictionary value is neither a string nor an object, skipping"),
        }
    }
    Ok(dictionary)
}

fn parse_node(object: &Map<String, Value>, path: &str) -> LocaleResult<Template> {
    if object.contains_key(PLURAL_MARKER) {
        return parse_plural(object, path).map(Template::from);
    }
    if let Some(marker) = object.get(SELECT_MARKER) {
        let variable = marker.as_str().ok_or_else(|| invalid(path, "`@select` must name a variable"))?;
        return parse_select(variable, object, path).map(Template::from);
    }
    parse_branch(object, path).map(Template::from)
}

fn invalid(path: &str, reason: impl Into<String>) -> LocaleError {
    LocaleError::InvalidDictionary {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn branch_text<'a>(path: &str, key: &str, value: &'a Value) -> LocaleResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| invalid(&child_path(path, key), "selection branches must be strings"))
}

fn parse_plural(object: &Map<String, Value>, path: &str) -> LocaleResult<Selection> {
    let mut builder = plural();
    let mut other = None;
    for (key, value) in object.iter().filter(|(key, _)| !key.starts_with('@')) {
        let text = branch_text(path, key, value)?;
        match key.as_str() {
            "none" => builder = builder.none(text),
            "one" => builder = builder.one(text),
            "other" => other = Some(text),
            unknown => {
                return Err(invalid(
                    path,
                    format!(
                        "unknown plural branch `{}`, expected one of {}",
                        unknown,
                        PLURAL_BRANCHES.join(", ")
                    ),
                ));
            }
        }
    }
    let other = other.ok_or_else(|| invalid(path, "plural is missing its `other` branch"))?;
    Ok(builder.other(other))
}

fn parse_select(variable: &str, object: &Map<String, Value>, path: &str) -> LocaleResult<Selection> {
    let mut builder = select(variable);
    let mut other = None;
    for (key, value) in object.iter().filter(|(key, _)| !key.starts_with('@')) {
        let text = branch_text(path, key, value)?;
        if key == "other" {
            other = Some(text);
        } else {
            builder = builder.case(key, text);
        }
    }
    let other = other.ok_or_else(|| invalid(path, "select is missing its `other` branch"))?;
    Ok(builder.other(other))
}

/// Load one dictionary from a JSON file.
///
/// # Errors
///
/// - `LocaleError::Io` if the file cannot be read
/// - `LocaleError::Json` if it is not valid JSON
/// - `LocaleError::InvalidDictionary` if it has the wrong structure
pub fn load_dictionary_from_file(path: &Path) -> LocaleResult<Dictionary> {
    let content = fs::read_to_string(path).map_err(|source| LocaleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json: Value = serde_json::from_str(&content).map_err(|source| LocaleError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dictionary(&json).map_err(|err| match err {
        LocaleError::InvalidDictionary { path: key, reason } => LocaleError::InvalidDictionary {
            path: format!("{}:{}", path.display(), key),
            reason,
        },
        other => other,
    })
}

/// Load every `*.json` file in `dir` into a catalog.
///
/// The file stem is the locale: `en.json` is registered as `en`,
/// `zh-hans.json` as `zh-Hans`.
pub fn load_all_dictionaries_from_dir(dir: &Path) -> LocaleResult<Catalog> {
    let entries = fs::read_dir(dir).map_err(|source| LocaleError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut catalog = Catalog::new();
    let mut loaded = 0usize;
    for entry in entries {
        let path = entry
            .map_err(|source| LocaleError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!(path = %path.display(), "skipping dictionary file with a non UTF-8 name");
            continue;
        };

        let dictionary = load_dictionary_from_file(&path)?;
        debug!(%locale, entries = dictionary.len(), "loaded dictionary");
        catalog.with_dictionary(locale, dictionary);
        loaded += 1;
    }

    if loaded == 0 {
        warn!(dir = %dir.display(), "no JSON dictionaries found");
    }

    Ok(catalog)
}
