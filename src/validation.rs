//! Localized messages for foreign validation errors.
//!
//! A validation library is configured with deferred tokens (see
//! [`defer`](crate::defer)) in place of error messages. When it reports
//! issues, the tokens are picked out and rendered in whatever locale the
//! current translator speaks; every other message passes through unchanged.
//!
//! Reports can be deserialized straight from the collaborator's JSON:
//!
//! ```json
//! { "issues": [ { "path": ["email"], "message": "__TRANSLATION_MESSAGE__:{...}", "code": "invalid_string" } ] }
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::deferred::{DeferredMessage, is_deferred};
use crate::path::Path;
use crate::translator::Translate;

/// One issue reported by the validation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: Path,
    pub message: String,
    pub code: String,
}

/// A foreign validation error: `{ "issues": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

/// An issue whose message is a decoded deferred token.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationIssue {
    pub path: Path,
    pub message: DeferredMessage,
    pub code: String,
}

impl TranslationIssue {
    pub fn render<T: Translate>(&self, translator: &T) -> ValidationIssue {
        ValidationIssue {
            path: self.path.clone(),
            message: translator.translate_with(&|generator| self.message.select(generator)),
            code: self.code.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitIssues {
    pub translation_issues: Vec<TranslationIssue>,
    pub regular_issues: Vec<ValidationIssue>,
}

fn decode_issue(issue: &ValidationIssue) -> Option<TranslationIssue> {
    if !is_deferred(&issue.message) {
        return None;
    }
    match DeferredMessage::decode(&issue.message) {
        Ok(message) => Some(TranslationIssue {
            path: issue.path.clone(),
            message,
            code: issue.code.clone(),
        }),
        Err(err) => {
            warn!(%err, code = %issue.code, "malformed deferred message, keeping it as a regular issue");
            None
        }
    }
}

/// Partition issues into decodable deferred messages and everything else.
///
/// Both partitions keep input order. Messages that carry the token prefix but
/// do not decode are regular issues.
pub fn split_issues(issues: &[ValidationIssue]) -> SplitIssues {
    let mut split = SplitIssues::default();
    for issue in issues {
        match decode_issue(issue) {
            Some(translation) => split.translation_issues.push(translation),
            None => split.regular_issues.push(issue.clone()),
        }
    }
    split
}

/// Render every translation issue through `translator`, preserving path and code
pub fn render_issues<T: Translate>(issues: &[TranslationIssue], translator: &T) -> Vec<ValidationIssue> {
    issues.iter().map(|issue| issue.render(translator)).collect()
}

/// Order of the combined list produced by [`IssueRenderer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueOrder {
    /// Rendered issues first, then regular ones
    #[default]
    TranslatedFirst,
    /// Same order as the report
    Original,
}

/// Renders whole validation reports in one locale.
#[derive(Debug, Clone)]
pub struct IssueRenderer<T> {
    translator: T,
    order: IssueOrder,
}

impl<T: Translate> IssueRenderer<T> {
    pub fn new(translator: T) -> Self {
        IssueRenderer {
            translator,
            order: IssueOrder::default(),
        }
    }

    pub fn with_order(mut self, order: IssueOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> IssueOrder {
        self.order
    }

    pub fn render(&self, report: &ValidationReport) -> Vec<ValidationIssue> {
        match self.order {
            IssueOrder::TranslatedFirst => {
                let split = split_issues(&report.issues);
                let mut rendered = render_issues(&split.translation_issues, &self.translator);
                rendered.extend(split.regular_issues);
                rendered
            }
            IssueOrder::Original => report
                .issues
                .iter()
                .map(|issue| match decode_issue(issue) {
                    Some(translation) => translation.render(&self.translator),
                    None => issue.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deferred::{TOKEN_PREFIX, defer};
    use crate::dictionary::Dictionary;
    use crate::path::{PathSegment, path_of};
    use crate::translator::Translator;
    use crate::vars;
    use serde_json::json;

    fn en() -> Dictionary {
        crate::dictionary! {
            "required" => "This field is required",
            "invalidEmail" => "Please enter a valid email address",
            "passwordTooShort" => "Password must be at least {{min}} characters long",
            "passwordTooLong" => "Password must be no more than {{max}} characters long",
            "ageTooLow" => "You must be at least {{min}} years old",
            "invalidUsername" => "Username must contain only letters, numbers, and underscores",
            "nested" => {
                "validation" => {
                    "stringTooShort" => "Must be at least {{min}} characters",
                    "numberTooLow" => "Must be at least {{min}}",
                },
            },
        }
    }

    fn fr() -> Dictionary {
        crate::dictionary! {
            "required" => "Ce champ est obligatoire",
            "invalidEmail" => "Veuillez saisir une adresse e-mail valide",
            "passwordTooShort" => "Le mot de passe doit contenir au moins {{min}} caractères",
            "passwordTooLong" => "Le mot de passe ne doit pas dépasser {{max}} caractères",
            "ageTooLow" => "Vous devez avoir au moins {{min}} ans",
            "invalidUsername" => "Le nom d'utilisateur ne peut contenir que des lettres, chiffres et underscores",
            "nested" => {
                "validation" => {
                    "stringTooShort" => "Doit contenir au moins {{min}} caractères",
                    "numberTooLow" => "Doit être au moins {{min}}",
                },
            },
        }
    }

    fn issue(path: Path, message: impl Into<String>, code: &str) -> ValidationIssue {
        ValidationIssue {
            path,
            message: message.into(),
            code: code.to_string(),
        }
    }

    fn message_at<'a>(issues: &'a [ValidationIssue], field: &str) -> Option<&'a str> {
        issues
            .iter()
            .find(|issue| issue.path.first() == Some(&PathSegment::from(field)))
            .map(|issue| issue.message.as_str())
    }

    #[test]
    fn test_split_translation_issues() {
        let issues = vec![
            issue(path_of(["name"]), defer(|l| l.at("required")), "too_small"),
            issue(path_of(["email"]), defer(|l| l.at("invalidEmail")), "invalid_string"),
        ];
        let split = split_issues(&issues);

        assert_eq!(split.translation_issues.len(), 2);
        assert!(split.regular_issues.is_empty());
        assert_eq!(split.translation_issues[0].path, path_of(["name"]));
        assert_eq!(split.translation_issues[1].path, path_of(["email"]));
    }

    #[test]
    fn test_render_issues_per_locale() {
        let issues = vec![
            issue(path_of(["username"]), defer(|l| l.at("required")), "too_small"),
            issue(
                path_of(["password"]),
                defer(|l| l.at("passwordTooShort").with(vars! { "min" => 8 })),
                "too_small",
            ),
        ];
        let split = split_issues(&issues);
        let rendered_en = render_issues(&split.translation_issues, &Translator::new(en()));
        let rendered_fr = render_issues(&split.translation_issues, &Translator::new(fr()));

        assert_eq!(rendered_en[0].message, "This field is required");
        assert_eq!(rendered_en[1].message, "Password must be at least 8 characters long");
        assert_eq!(rendered_fr[0].message, "Ce champ est obligatoire");
        assert_eq!(
            rendered_fr[1].message,
            "Le mot de passe doit contenir au moins 8 caractères"
        );
        assert_eq!(rendered_fr[1].code, "too_small");
    }

    #[test]
    fn test_single_report_multiple_renderers() {
        let report = ValidationReport {
            issues: vec![
                issue(path_of(["email"]), defer(|l| l.at("invalidEmail")), "invalid_string"),
                issue(
                    path_of(["password"]),
                    defer(|l| l.at("passwordTooShort").with(vars! { "min" => 8 })),
                    "too_small",
                ),
            ],
        };

        let english = IssueRenderer::new(Translator::new(en())).render(&report);
        let french = IssueRenderer::new(Translator::new(fr())).render(&report);

        assert_eq!(english.len(), 2);
        assert_eq!(french.len(), 2);
        assert_eq!(
            message_at(&english, "email"),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            message_at(&french, "email"),
            Some("Veuillez saisir une adresse e-mail valide")
        );
        assert_eq!(
            message_at(&french, "password"),
            Some("Le mot de passe doit contenir au moins 8 caractères")
        );
    }

    #[test]
    fn test_user_registration_report_from_json() {
        let report: ValidationReport = serde_json::from_value(json!({
            "issues": [
                { "path": ["username"], "message": defer(|l| l.at("invalidUsername")), "code": "invalid_string" },
                { "path": ["email"], "message": defer(|l| l.at("invalidEmail")), "code": "invalid_string" },
                {
                    "path": ["password"],
                    "message": defer(|l| l.at("passwordTooShort").with(vars! { "min" => 8 })),
                    "code": "too_small"
                },
                {
                    "path": ["age"],
                    "message": defer(|l| l.at("ageTooLow").with(vars! { "min" => 18 })),
                    "code": "too_small"
                }
            ]
        }))
        .unwrap();

        let errors = IssueRenderer::new(Translator::new(fr())).render(&report);
        assert_eq!(errors.len(), 4);
        assert_eq!(
            message_at(&errors, "username"),
            Some("Le nom d'utilisateur ne peut contenir que des lettres, chiffres et underscores")
        );
        assert_eq!(message_at(&errors, "age"), Some("Vous devez avoir au moins 18 ans"));
    }

    #[test]
    fn test_nested_paths_survive_rendering() {
        let issues = vec![
            issue(
                path_of(["profile", "bio"]),
                defer(|l| {
                    l.at("nested")
                        .at("validation")
                        .at("stringTooShort")
                        .with(vars! { "min" => 10 })
                }),
                "too_small",
            ),
            issue(
                path_of(["profile", "score"]),
                defer(|l| {
                    l.at("nested")
                        .at("validation")
                        .at("numberTooLow")
                        .with(vars! { "min" => 0 })
                }),
                "too_small",
            ),
        ];
        let split = split_issues(&issues);
        let rendered_en = render_issues(&split.translation_issues, &Translator::new(en()));
        let rendered_fr = render_issues(&split.translation_issues, &Translator::new(fr()));

        assert_eq!(rendered_en[0].path, path_of(["profile", "bio"]));
        assert_eq!(rendered_en[0].message, "Must be at least 10 characters");
        assert_eq!(rendered_en[1].path, path_of(["profile", "score"]));
        assert_eq!(rendered_en[1].message, "Must be at least 0");
        assert_eq!(rendered_fr[0].message, "Doit contenir au moins 10 caractères");
        assert_eq!(rendered_fr[1].message, "Doit être au moins 0");
    }

    #[test]
    fn test_mixed_translated_and_regular_messages() {
        let issues = vec![
            issue(path_of(["regularField"]), "This is a regular message", "too_small"),
            issue(path_of(["translatedField"]), defer(|l| l.at("required")), "too_small"),
        ];
        let split = split_issues(&issues);
        assert_eq!(split.translation_issues.len(), 1);
        assert_eq!(split.regular_issues.len(), 1);
        assert_eq!(split.translation_issues[0].path, path_of(["translatedField"]));
        assert_eq!(split.regular_issues[0].message, "This is a regular message");

        let report = ValidationReport { issues };
        let translated_first = IssueRenderer::new(Translator::new(fr())).render(&report);
        assert_eq!(translated_first[0].message, "Ce champ est obligatoire");
        assert_eq!(translated_first[1].message, "This is a regular message");

        let original = IssueRenderer::new(Translator::new(fr()))
            .with_order(IssueOrder::Original)
            .render(&report);
        assert_eq!(original[0].message, "This is a regular message");
        assert_eq!(original[1].message, "Ce champ est obligatoire");
    }

    #[test]
    fn test_malformed_tokens_are_regular_issues() {
        let malformed = format!("{}{{broken", TOKEN_PREFIX);
        let issues = vec![issue(path_of(["field"]), malformed.clone(), "custom")];

        let split = split_issues(&issues);
        assert!(split.translation_issues.is_empty());
        assert_eq!(split.regular_issues[0].message, malformed);

        let rendered = IssueRenderer::new(Translator::new(en()))
            .render(&ValidationReport { issues });
        assert_eq!(rendered[0].message, malformed);
    }

    #[test]
    fn test_numeric_path_segments_round_trip() {
        let report: ValidationReport = serde_json::from_value(json!({
            "issues": [ { "path": ["items", 2, "name"], "message": "Required", "code": "too_small" } ]
        }))
        .unwrap();
        assert_eq!(
            report.issues[0].path,
            vec![
                PathSegment::from("items"),
                PathSegment::from(2u64),
                PathSegment::from("name"),
            ]
        );
        let back = serde_json::to_value(&report).unwrap();
        assert_eq!(back["issues"][0]["path"], json!(["items", 2, "name"]));
    }

    #[test]
    fn test_default_order_is_translated_first() {
        let renderer = IssueRenderer::new(Translator::new(en()));
        assert_eq!(renderer.order(), IssueOrder::TranslatedFirst);
    }
}
