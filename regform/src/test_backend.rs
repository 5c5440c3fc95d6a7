//! Test backend for driving forms without user interaction.
//!
//! `TestBackend` replays a script of edits and submits against a mounted
//! form, the way a user would through a real renderer.
//!
//! # Example
//!
//! ```
//! use regform::{Form, RegistrationDraft, TestBackend, paths};
//!
//! let mut submitted = Vec::new();
//! let controller = RegistrationDraft::run_with(
//!     TestBackend::new()
//!         .fill(paths::FIRST_NAME, "Ada")
//!         .fill(paths::LAST_NAME, "Lovelace")
//!         .fill(paths::EMAIL, "ada@example.com")
//!         .fill(paths::COMPANY, "Analytical Engines")
//!         .select(paths::BIRTH_MONTH, "12")
//!         .select(paths::BIRTH_DAY, "10")
//!         .select(paths::BIRTH_YEAR, "1985")
//!         .submit(),
//!     |registration| submitted.push(registration),
//! )
//! .unwrap();
//!
//! assert_eq!(submitted.len(), 1);
//! assert_eq!(submitted[0].date_of_birth.month, "12");
//! assert!(controller.errors().is_empty());
//! ```

use regform_types::{Form, FormBackend, FormController, FormError};
use tracing::debug;

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the text of a text field.
    Fill { path: String, value: String },

    /// Choose an option of a select by its value.
    Select { path: String, value: String },

    /// Press the submit button.
    Submit,
}

/// A backend that replays pre-configured actions.
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    actions: Vec<Action>,
}

/// Error type for TestBackend.
#[derive(Debug, thiserror::Error)]
pub enum TestBackendError {
    #[error("Action #{index} failed: {source}")]
    Action {
        index: usize,
        #[source]
        source: FormError,
    },
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn fill(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.actions.push(Action::Fill {
            path: path.into(),
            value: value.into(),
        });
        self
    }

    pub fn select(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.actions.push(Action::Select {
            path: path.into(),
            value: value.into(),
        });
        self
    }

    pub fn submit(mut self) -> Self {
        self.actions.push(Action::Submit);
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl FormBackend for TestBackend {
    type Error = TestBackendError;

    fn run<T: Form>(
        &self,
        controller: &mut FormController<T>,
        on_submit: &mut dyn FnMut(T),
    ) -> Result<(), Self::Error> {
        for (index, action) in self.actions.iter().enumerate() {
            debug!(index, ?action, "replaying");
            apply(controller, action, on_submit)
                .map_err(|source| TestBackendError::Action { index, source })?;
        }
        Ok(())
    }
}

fn apply<T: Form>(
    controller: &mut FormController<T>,
    action: &Action,
    on_submit: &mut dyn FnMut(T),
) -> Result<(), FormError> {
    match action {
        Action::Fill { path, value } => controller.register(path.as_str())?.set(value.as_str()),
        Action::Select { path, value } => controller.control(path.as_str())?.on_change(value.as_str())?,
        Action::Submit => {
            controller.submit(|value| on_submit(value))?;
        }
    }
    Ok(())
}
