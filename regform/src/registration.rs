//! The registration form: its typed value, layout and rules.

use regform_types::{
    Draft, DraftError, Field, FieldPath, Form, FormDefinition, Row, Rule, Schema,
};
use serde::Serialize;
use tracing::info;

use crate::options::{current_year, day_options, month_options, year_options};

/// Field paths of the registration draft.
pub mod paths {
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const COMPANY: &str = "company";
    pub const EMAIL: &str = "email";
    pub const BIRTH_MONTH: &str = "date_of_birth.month";
    pub const BIRTH_DAY: &str = "date_of_birth.day";
    pub const BIRTH_YEAR: &str = "date_of_birth.year";

    /// Every field, in the order the form lays them out.
    pub const ALL: [&str; 7] = [
        FIRST_NAME,
        LAST_NAME,
        EMAIL,
        COMPANY,
        BIRTH_MONTH,
        BIRTH_DAY,
        BIRTH_YEAR,
    ];
}

/// A validated registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub date_of_birth: DateOfBirth,
}

/// Month and day are zero-padded (`"03"`), the year has four digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateOfBirth {
    pub month: String,
    pub day: String,
    pub year: String,
}

impl RegistrationDraft {
    /// The form layout with the year select ending at `current_year`.
    pub fn definition_for_year(current_year: i32) -> FormDefinition {
        FormDefinition::new(
            "Registration",
            vec![
                Row::new(vec![
                    Field::text(paths::FIRST_NAME, "First Name"),
                    Field::text(paths::LAST_NAME, "Last Name"),
                ]),
                Row::new(vec![
                    Field::email(paths::EMAIL, "Email Address"),
                    Field::text(paths::COMPANY, "Company"),
                ]),
                Row::new(vec![
                    Field::select(paths::BIRTH_MONTH, "Month", month_options())
                        .with_label("Date of Birth"),
                    Field::select(paths::BIRTH_DAY, "Day", day_options()),
                    Field::select(paths::BIRTH_YEAR, "Year", year_options(current_year)),
                ]),
            ],
        )
        .with_submit_label("Register")
    }
}

impl Form for RegistrationDraft {
    fn definition() -> FormDefinition {
        Self::definition_for_year(current_year())
    }

    fn schema() -> Schema {
        Schema::new()
            .field(paths::FIRST_NAME, [Rule::required("First name is required")])
            .field(paths::LAST_NAME, [Rule::required("Last name is required")])
            .field(paths::COMPANY, [Rule::required("Company is required")])
            .field(
                paths::EMAIL,
                [
                    Rule::email("Invalid email address"),
                    Rule::required("Email is required"),
                ],
            )
            .field(paths::BIRTH_MONTH, [Rule::required("Month is required")])
            .field(paths::BIRTH_DAY, [Rule::required("Day is required")])
            .field(paths::BIRTH_YEAR, [Rule::required("Year is required")])
    }

    fn from_draft(draft: &Draft) -> Result<Self, DraftError> {
        let text = |path: &str| draft.require(&FieldPath::new(path)).map(str::to_string);
        Ok(Self {
            first_name: text(paths::FIRST_NAME)?,
            last_name: text(paths::LAST_NAME)?,
            company: text(paths::COMPANY)?,
            email: text(paths::EMAIL)?,
            date_of_birth: DateOfBirth {
                month: text(paths::BIRTH_MONTH)?,
                day: text(paths::BIRTH_DAY)?,
                year: text(paths::BIRTH_YEAR)?,
            },
        })
    }
}

/// Completion handler that logs the accepted payload as JSON.
pub fn log_registration(registration: RegistrationDraft) {
    match serde_json::to_string(&registration) {
        Ok(json) => info!(payload = %json, "registration submitted"),
        Err(err) => info!(?registration, %err, "registration submitted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_rows() {
        let definition = RegistrationDraft::definition_for_year(2026);
        assert_eq!(definition.title, "Registration");
        assert_eq!(definition.submit_label, "Register");

        let row_sizes: Vec<_> = definition.rows().iter().map(|r| r.fields().len()).collect();
        assert_eq!(row_sizes, vec![2, 2, 3]);

        let order: Vec<_> = definition.fields().map(|f| f.path().as_str()).collect();
        assert_eq!(order, paths::ALL);
    }

    #[test]
    fn date_of_birth_shares_one_label() {
        let definition = RegistrationDraft::definition_for_year(2026);
        let labels: Vec<_> = definition.rows()[2].fields().iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec![Some("Date of Birth"), None, None]);

        let placeholders: Vec<_> = definition.rows()[2]
            .fields()
            .iter()
            .map(|f| f.placeholder())
            .collect();
        assert_eq!(placeholders, vec!["Month", "Day", "Year"]);
    }

    #[test]
    fn schema_covers_every_field() {
        let schema = RegistrationDraft::schema();
        for path in paths::ALL {
            assert!(
                schema.rules_for(&FieldPath::new(path)).is_some(),
                "{path} has no rules"
            );
        }
    }

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let registration = RegistrationDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            company: "Analytical Engines".into(),
            email: "ada@example.com".into(),
            date_of_birth: DateOfBirth {
                month: "12".into(),
                day: "10".into(),
                year: "1985".into(),
            },
        };

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["dateOfBirth"]["month"], "12");
        assert_eq!(json["dateOfBirth"]["year"], "1985");
    }
}
