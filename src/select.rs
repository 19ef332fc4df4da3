use std::collections::{BTreeMap, BTreeSet};

use crate::phrase::Phrase;
use crate::variables::Variables;

/// Variable that drives plural selection
pub const PLURAL_VARIABLE: &str = "count";

/// How a [`Selection`] matches its discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// `count == 0` picks `none`, `count == 1` picks `one`
    Plural,
    /// Exact match of the variable's value against case keys
    Select,
}

/// A discriminator-keyed set of phrases with a mandatory `other` fallback.
///
/// Built with [`select`] or [`plural`]; `other` is always present because
/// only the finishing `.other(..)` call yields a `Selection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    kind: SelectionKind,
    variable: String,
    cases: BTreeMap<String, Phrase>,
    other: Phrase,
}

impl Selection {
    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn cases(&self) -> impl Iterator<Item = (&str, &Phrase)> {
        self.cases.iter().map(|(key, phrase)| (key.as_str(), phrase))
    }

    pub fn other(&self) -> &Phrase {
        &self.other
    }

    /// Union of the placeholders of every branch
    pub fn params(&self) -> BTreeSet<String> {
        self.cases
            .values()
            .chain(std::iter::once(&self.other))
            .flat_map(|phrase| phrase.params().iter().cloned())
            .collect()
    }

    /// Pick the branch for `variables`, before substitution.
    pub fn resolve(&self, variables: Option<&Variables>) -> &Phrase {
        let value = variables.and_then(|variables| variables.get(&self.variable));
        let case = match self.kind {
            SelectionKind::Plural => match value.and_then(|value| value.as_number()) {
                Some(count) if count == 0.0 => self.cases.get("none"),
                Some(count) if count == 1.0 => self.cases.get("one"),
                _ => None,
            },
            SelectionKind::Select => value.and_then(|value| self.cases.get(&value.to_string())),
        };
        case.unwrap_or(&self.other)
    }

    /// Pick the branch and substitute `variables` into it.
    pub fn render(&self, variables: Option<&Variables>) -> String {
        self.resolve(variables).build(variables)
    }
}

/// Start a value-based selection on `variable`.
///
/// ```
/// use typed_locale::select;
///
/// let fruit = select("fruit")
///     .case("apple", "I like apples")
///     .other("I prefer {{fruit}}");
/// assert_eq!(fruit.variable(), "fruit");
/// ```
pub fn select(variable: impl Into<String>) -> SelectBuilder {
    SelectBuilder {
        variable: variable.into(),
        cases: BTreeMap::new(),
    }
}

/// Start a plural selection on `count`.
pub fn plural() -> PluralBuilder {
    PluralBuilder {
        cases: BTreeMap::new(),
    }
}

#[derive(Debug, Clone)]
pub struct SelectBuilder {
    variable: String,
    cases: BTreeMap<String, Phrase>,
}

impl SelectBuilder {
    /// Add a branch matched when the variable's value equals `value`
    pub fn case(mut self, value: impl ToString, template: impl Into<Phrase>) -> Self {
        self.cases.insert(value.to_string(), template.into());
        self
    }

    pub fn other(self, template: impl Into<Phrase>) -> Selection {
        Selection {
            kind: SelectionKind::Select,
            variable: self.variable,
            cases: self.cases,
            other: template.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PluralBuilder {
    cases: BTreeMap<String, Phrase>,
}

impl PluralBuilder {
    pub fn none(mut self, template: impl Into<Phrase>) -> Self {
        self.cases.insert("none".to_string(), template.into());
        self
    }

    pub fn one(mut self, template: impl Into<Phrase>) -> Self {
        self.cases.insert("one".to_string(), template.into());
        self
    }

    pub fn other(self, template: impl Into<Phrase>) -> Selection {
        Selection {
            kind: SelectionKind::Plural,
            variable: PLURAL_VARIABLE.to_string(),
            cases: self.cases,
            other: template.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars;

    fn messages() -> Selection {
        select("count")
            .case(0, "none")
            .case(1, "one")
            .other("many {{count}}")
    }

    #[test]
    fn test_select_on_count() {
        let selection = messages();
        assert_eq!(selection.render(Some(&vars! { "count" => 0 })), "none");
        assert_eq!(selection.render(Some(&vars! { "count" => 1 })), "one");
        assert_eq!(selection.render(Some(&vars! { "count" => 5 })), "many 5");
    }

    #[test]
    fn test_select_matches_string_values() {
        let fruit = select("fruit")
            .case("apple", "I like apples")
            .case("banana", "I enjoy bananas")
            .other("I prefer {{fruit}}");

        assert_eq!(fruit.render(Some(&vars! { "fruit" => "apple" })), "I like apples");
        assert_eq!(fruit.render(Some(&vars! { "fruit" => "banana" })), "I enjoy bananas");
        assert_eq!(fruit.render(Some(&vars! { "fruit" => "orange" })), "I prefer orange");
    }

    #[test]
    fn test_select_number_matches_string_case_key() {
        let selection = messages();
        assert_eq!(selection.render(Some(&vars! { "count" => "1" })), "one");
    }

    #[test]
    fn test_missing_variable_falls_through_to_other() {
        let selection = messages();
        assert_eq!(selection.render(Some(&vars! {})), "many {{count}}");
        assert_eq!(selection.render(None), "many {{count}}");
    }

    #[test]
    fn test_plural_branches() {
        let messages = plural()
            .none("You have no messages")
            .one("You have 1 message")
            .other("You have {{count}} messages");

        assert_eq!(messages.render(Some(&vars! { "count" => 0 })), "You have no messages");
        assert_eq!(messages.render(Some(&vars! { "count" => 1 })), "You have 1 message");
        assert_eq!(messages.render(Some(&vars! { "count" => 2 })), "You have 2 messages");
    }

    #[test]
    fn test_plural_without_optional_branches() {
        let messages = plural().other("{{count}} items");
        assert_eq!(messages.render(Some(&vars! { "count" => 0 })), "0 items");
        assert_eq!(messages.render(Some(&vars! { "count" => 1 })), "1 items");
    }

    #[test]
    fn test_plural_requires_numeric_count() {
        let messages = plural().none("nothing").other("{{count}} things");
        assert_eq!(messages.render(Some(&vars! { "count" => "0" })), "0 things");
        assert_eq!(messages.render(Some(&vars! { "count" => 0.0 })), "nothing");
    }

    #[test]
    fn test_select_has_no_plural_special_casing() {
        let selection = select("count").case("none", "nothing").other("{{count}}");
        assert_eq!(selection.render(Some(&vars! { "count" => 0 })), "0");
    }

    #[test]
    fn test_params_union() {
        let selection = plural()
            .none("Hello, {{name}}. You have no messages")
            .other("Hello, {{name}}. You have {{count}} messages");
        let params: Vec<String> = selection.params().into_iter().collect();
        assert_eq!(params, vec!["count".to_string(), "name".to_string()]);
        assert_eq!(selection.kind(), SelectionKind::Plural);
        assert_eq!(selection.variable(), "count");
    }
}
