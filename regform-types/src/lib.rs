//! Core types for the regform crate.
//!
//! This crate provides the presentation-agnostic pieces of a form:
//! - `FormDefinition`, `Row` and `Field` - The layout and widgets
//! - `Schema` and `Rule` - Validity rules, evaluated on submit
//! - `Draft` and `FieldPath` - The in-progress values and their keys
//! - `FormController` - Draft ownership, field bindings and the submit cycle
//! - `Form` and `FormBackend` traits - For implementing forms and renderers

mod field_path;
pub use field_path::FieldPath;

mod draft;
pub use draft::{Draft, DraftError};

mod field;
pub use field::{Field, FieldKind, InputType, Row, SelectInput, SelectOption, TextInput};

mod form_definition;
pub use form_definition::FormDefinition;

pub mod email;

mod validation;
pub use validation::{FieldErrors, FieldIssue, ValidationReport};

mod schema;
pub use schema::{FieldRules, MISSING_MESSAGE, Rule, Schema};

mod controller;
pub use controller::{Controlled, FormController, SubmitOutcome, SubmitState, TextBinding};

mod error;
pub use error::FormError;

mod traits;
pub use traits::{Form, FormBackend};
