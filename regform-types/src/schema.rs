//! Declarative validity rules for a draft.
//!
//! A [`Schema`] is a table of field path -> ordered rules. Validation walks
//! the whole table on every call and reports every violated rule, so a
//! single submit surfaces all invalid fields at once.

use crate::{Draft, FieldIssue, FieldPath, ValidationReport, email};

/// Message reported for a field that holds no value at all.
pub const MISSING_MESSAGE: &str = "Required";

/// A single validity rule and the message reported when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The value must not be the empty string.
    Required { message: String },

    /// The value must be shaped like an email address.
    Email { message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    /// Check `value` against this rule, returning the failure message.
    pub fn check(&self, value: &str) -> Result<(), &str> {
        match self {
            Self::Required { message } if value.is_empty() => Err(message),
            Self::Email { message } if !email::is_email(value) => Err(message),
            _ => Ok(()),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Required { message } | Self::Email { message } => message,
        }
    }
}

/// The rules of one field, evaluated in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    pub path: FieldPath,
    pub rules: Vec<Rule>,
}

/// A table of field rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field and its rules. Rules run in the given order and every
    /// failing rule is reported.
    pub fn field(mut self, path: impl Into<FieldPath>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldRules {
            path: path.into(),
            rules: rules.into_iter().collect(),
        });
        self
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    pub fn rules_for(&self, path: &FieldPath) -> Option<&[Rule]> {
        self.fields
            .iter()
            .find(|f| &f.path == path)
            .map(|f| f.rules.as_slice())
    }

    /// Validate the whole draft.
    ///
    /// A field absent from the draft fails with [`MISSING_MESSAGE`] and its
    /// remaining rules are skipped. Present fields run every rule.
    pub fn validate(&self, draft: &Draft) -> Result<(), ValidationReport> {
        let mut issues = Vec::new();

        for field in &self.fields {
            let Some(value) = draft.get(&field.path) else {
                issues.push(FieldIssue::new(field.path.clone(), MISSING_MESSAGE));
                continue;
            };

            for rule in &field.rules {
                if let Err(message) = rule.check(value) {
                    issues.push(FieldIssue::new(field.path.clone(), message));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport::new(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_schema() -> Schema {
        Schema::new()
            .field("name", [Rule::required("Name is required")])
            .field(
                "email",
                [
                    Rule::email("Invalid email address"),
                    Rule::required("Email is required"),
                ],
            )
    }

    #[test]
    fn valid_draft_passes() {
        let draft: Draft = [("name", "Ada"), ("email", "ada@example.com")]
            .into_iter()
            .collect();
        assert!(contact_schema().validate(&draft).is_ok());
    }

    #[test]
    fn reports_every_invalid_field() {
        let draft: Draft = [("name", ""), ("email", "nope")].into_iter().collect();
        let report = contact_schema().validate(&draft).unwrap_err();

        let errors = report.field_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(&FieldPath::new("name")), Some("Name is required"));
        assert_eq!(
            errors.get(&FieldPath::new("email")),
            Some("Invalid email address")
        );
    }

    #[test]
    fn empty_email_fails_both_rules_in_order() {
        let draft: Draft = [("name", "Ada"), ("email", "")].into_iter().collect();
        let report = contact_schema().validate(&draft).unwrap_err();

        let messages: Vec<_> = report.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["Invalid email address", "Email is required"]);
        assert_eq!(report.field_errors().len(), 1);
    }

    #[test]
    fn absent_field_reports_missing_once() {
        let draft: Draft = [("name", "Ada")].into_iter().collect();
        let report = contact_schema().validate(&draft).unwrap_err();

        assert_eq!(report.issues(), &[FieldIssue::new("email", MISSING_MESSAGE)]);
    }

    #[test]
    fn rule_lookup() {
        let schema = contact_schema();
        assert_eq!(schema.rules_for(&FieldPath::new("email")).map(<[Rule]>::len), Some(2));
        assert!(schema.rules_for(&FieldPath::new("phone")).is_none());
        assert_eq!(Rule::required("x").message(), "x");
    }
}
