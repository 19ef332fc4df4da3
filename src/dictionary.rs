use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::path::{Path, PathSegment};
use crate::phrase::Phrase;
use crate::select::Selection;
use crate::variables::Variables;

/// An authored message definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// A phrase with zero or more `{{placeholders}}`
    Literal(Arc<Phrase>),
    /// A plural or select configuration
    Selection(Arc<Selection>),
    /// A nested mapping
    Branch(Dictionary),
}

impl Template {
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Template::Branch(_))
    }

    pub fn as_branch(&self) -> Option<&Dictionary> {
        match self {
            Template::Branch(dictionary) => Some(dictionary),
            _ => None,
        }
    }

    /// Placeholder names a leaf expects; empty for branches
    pub fn params(&self) -> BTreeSet<String> {
        match self {
            Template::Literal(phrase) => phrase.params().clone(),
            Template::Selection(selection) => selection.params(),
            Template::Branch(_) => BTreeSet::new(),
        }
    }

    /// Format a leaf. Returns `None` for branches.
    pub fn render(&self, variables: Option<&Variables>) -> Option<String> {
        match self {
            Template::Literal(phrase) => Some(phrase.build(variables)),
            Template::Selection(selection) => Some(selection.render(variables)),
            Template::Branch(_) => None,
        }
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::Literal(Arc::new(Phrase::new(text)))
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::Literal(Arc::new(Phrase::new(text)))
    }
}

impl From<Phrase> for Template {
    fn from(phrase: Phrase) -> Self {
        Template::Literal(Arc::new(phrase))
    }
}

impl From<Selection> for Template {
    fn from(selection: Selection) -> Self {
        Template::Selection(Arc::new(selection))
    }
}

impl From<Dictionary> for Template {
    fn from(dictionary: Dictionary) -> Self {
        Template::Branch(dictionary)
    }
}

/// One locale's message tree.
///
/// Cloning is cheap: the entries live behind an `Arc`, and [`Dictionary::update_deep`]
/// produces a new tree that shares every untouched branch with the old one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary(Arc<BTreeMap<String, Template>>);

impl Dictionary {
    pub fn new() -> Self {
        Dictionary(Arc::new(BTreeMap::new()))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Template>) -> &mut Self {
        Arc::make_mut(&mut self.0).insert(key.into(), value.into());
        self
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Template>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Template> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.0.iter().map(|(key, template)| (key.as_str(), template))
    }

    /// Node at `path`, or `None` as soon as a segment is absent.
    ///
    /// An empty path yields the whole tree as a branch.
    pub fn get_deep(&self, path: &[PathSegment]) -> Option<Template> {
        let mut current = Template::Branch(self.clone());
        for segment in path {
            current = match current {
                Template::Branch(dictionary) => dictionary.get(&segment.as_key())?.clone(),
                _ => return None,
            };
        }
        Some(current)
    }

    /// New tree with `value` stored at `path`; `self` is left untouched.
    ///
    /// Missing intermediate nodes are created, and intermediate leaves are
    /// replaced by branches. An empty path returns an unchanged clone.
    pub fn update_deep(&self, value: Template, path: &[PathSegment]) -> Dictionary {
        let Some((head, rest)) = path.split_first() else {
            return self.clone();
        };

        let key = head.as_key().into_owned();
        let updated = if rest.is_empty() {
            value
        } else {
            let child = match self.0.get(&key) {
                Some(Template::Branch(child)) => child.clone(),
                _ => Dictionary::new(),
            };
            Template::Branch(child.update_deep(value, rest))
        };

        let mut entries = (*self.0).clone();
        entries.insert(key, updated);
        Dictionary(Arc::new(entries))
    }

    /// Paths of every leaf, depth-first in key order
    pub fn leaf_paths(&self) -> Vec<Path> {
        let mut paths = Vec::new();
        self.collect_leaf_paths(&mut Vec::new(), &mut paths);
        paths
    }

    fn collect_leaf_paths(&self, prefix: &mut Path, paths: &mut Vec<Path>) {
        for (key, template) in self.0.iter() {
            prefix.push(PathSegment::Key(key.clone()));
            match template {
                Template::Branch(child) => child.collect_leaf_paths(prefix, paths),
                _ => paths.push(prefix.clone()),
            }
            prefix.pop();
        }
    }

    /// Leaves of `reference` that this dictionary cannot resolve
    pub fn missing_leaves(&self, reference: &Dictionary) -> Vec<Path> {
        reference
            .leaf_paths()
            .into_iter()
            .filter(|path| !matches!(self.get_deep(path), Some(template) if template.is_leaf()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<String>,
    V: Into<Template>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Dictionary(Arc::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }
}

/// Build a [`Dictionary`] from a nested literal.
///
/// ```
/// use typed_locale::{dictionary, plural};
///
/// let en = dictionary! {
///     "hello" => "Hello",
///     "nested" => {
///         "key" => "Nested key",
///     },
///     "messages" => plural().one("1 message").other("{{count}} messages"),
/// };
/// assert_eq!(en.len(), 3);
/// ```
#[macro_export]
macro_rules! dictionary {
    (@entries $dict:ident;) => {};
    (@entries $dict:ident; $key:literal => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $dict.insert($key, $crate::dictionary! { $($inner)* });
        $( $crate::dictionary!(@entries $dict; $($rest)*); )?
    };
    (@entries $dict:ident; $key:literal => $value:expr $(, $($rest:tt)*)?) => {
        $dict.insert($key, $value);
        $( $crate::dictionary!(@entries $dict; $($rest)*); )?
    };
    ($($body:tt)*) => {{
        #[allow(unused_mut)]
        let mut dict = $crate::Dictionary::new();
        $crate::dictionary!(@entries dict; $($body)*);
        dict
    }};
}
