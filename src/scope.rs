use crate::generator::{Generator, Resolution};
use crate::translator::Translate;

/// A translator restricted to a sub-tree.
///
/// Selectors passed to a `Scoped` translator start at the node chosen by the
/// narrowing function instead of the root, so nested components can write
/// `|l| l.at("title")` rather than `|l| l.at("settings").at("profile").at("title")`.
#[derive(Debug, Clone)]
pub struct Scoped<T, N> {
    inner: T,
    narrow: N,
}

impl<T, N> Scoped<T, N>
where
    T: Translate,
    N: Fn(Generator) -> Generator,
{
    pub fn new(inner: T, narrow: N) -> Self {
        Scoped { inner, narrow }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T, N> Translate for Scoped<T, N>
where
    T: Translate,
    N: Fn(Generator) -> Generator,
{
    fn translate_with(&self, selector: &dyn Fn(Generator) -> Resolution) -> String {
        self.inner
            .translate_with(&|generator| selector((self.narrow)(generator)))
    }
}

/// Free-function form of [`Translate::scoped`]
pub fn scope<T, N>(translator: T, narrow: N) -> Scoped<T, N>
where
    T: Translate,
    N: Fn(Generator) -> Generator,
{
    Scoped::new(translator, narrow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::translator::{Catalog, Translator};
    use crate::vars;

    fn en() -> Dictionary {
        crate::dictionary! {
            "scope" => {
                "hello" => "Hello",
                "helloName" => "Hello, {{name}}",
                "goodbye" => "Goodbye",
                "youHaveOneMessage" => "You have 1 message",
                "youHaveManyMessages" => "You have {{count}} messages",
                "nested" => {
                    "key" => "Deep nested key",
                    "keyWithName" => "Deep nested key with name {{name}}",
                },
                "missingKeys" => {
                    "missingKey" => "Missing key",
                    "missingKeyVariable" => "Missing key with variable {{name}}",
                },
            },
        }
    }

    fn translate_en() -> impl Translate {
        let mut catalog = Catalog::new();
        catalog.with_dictionary("en", en());
        scope(catalog.translator("en").unwrap(), |l| l.at("scope"))
    }

    #[test]
    fn test_scoped_translate() {
        let translate_en = translate_en();
        assert_eq!(translate_en.translate(|l| l.at("hello")), "Hello");
        assert_eq!(
            translate_en.translate(|l| l.at("helloName").with(vars! { "name" => "John" })),
            "Hello, John"
        );
    }

    #[test]
    fn test_scoped_variables_and_nested_keys() {
        let translate_en = translate_en();
        assert_eq!(
            translate_en.translate(|l| l.at("youHaveOneMessage")),
            "You have 1 message"
        );
        assert_eq!(
            translate_en.translate(|l| l.at("youHaveManyMessages").with(vars! { "count" => 2 })),
            "You have 2 messages"
        );
        assert_eq!(
            translate_en.translate(|l| l.at("nested").at("key")),
            "Deep nested key"
        );
        assert_eq!(
            translate_en
                .translate(|l| l.at("nested").at("keyWithName").with(vars! { "name" => "John" })),
            "Deep nested key with name John"
        );
    }

    #[test]
    fn test_scoped_missing_key_yields_empty_string() {
        let translate_en = translate_en();
        assert_eq!(translate_en.translate(|l| l.at("nonExistentKey").at("blabla")), "");
        assert_eq!(translate_en.translate(|l| l.at("nonExistentKey")), "");
    }

    #[test]
    fn test_scoped_ignores_unknown_variables() {
        assert_eq!(
            translate_en()
                .translate(|l| l.at("helloName").with(vars! { "name" => "John", "age" => 30 })),
            "Hello, John"
        );
    }

    #[test]
    fn test_scopes_compose() {
        let nested = Translator::new(en())
            .scoped(|l| l.at("scope"))
            .scoped(|l| l.at("missingKeys"));
        assert_eq!(nested.translate(|l| l.at("missingKey")), "Missing key");
        assert_eq!(
            nested.translate(|l| l.at("missingKeyVariable").with(vars! { "name" => "John" })),
            "Missing key with variable John"
        );
    }

    #[test]
    fn test_scope_over_borrowed_translator() {
        let translator = Translator::new(en());
        let scoped = (&translator).scoped(|l| l.at("scope").at("nested"));
        assert_eq!(scoped.translate(|l| l.at("key")), "Deep nested key");
        assert_eq!(translator.translate(|l| l.at("scope").at("hello")), "Hello");
    }
}
