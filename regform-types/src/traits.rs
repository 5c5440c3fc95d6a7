use crate::{Draft, DraftError, FormController, FormDefinition, FormError, Schema};

/// Trait for types that can be collected through a form.
///
/// Ties together the layout, the validity rules and the conversion from a
/// validated draft to the typed value.
pub trait Form: Sized {
    /// Returns the form layout (rows, fields, options, labels).
    fn definition() -> FormDefinition;

    /// Returns the validity rules checked on every submit.
    fn schema() -> Schema;

    /// Builds the typed value from a draft that passed [`schema`](Self::schema).
    fn from_draft(draft: &Draft) -> Result<Self, DraftError>;

    /// Mount a form and drive it through `backend` until the user is done.
    ///
    /// `on_submit` runs once per successful submit. The controller is
    /// returned so callers can inspect the final draft and submit count.
    fn run_with<B: FormBackend>(
        backend: B,
        mut on_submit: impl FnMut(Self),
    ) -> Result<FormController<Self>, FormError> {
        let mut controller = FormController::mount();
        backend
            .run(&mut controller, &mut on_submit)
            .map_err(FormError::backend)?;
        Ok(controller)
    }
}

/// Trait for presentation layers that drive a mounted form.
///
/// A backend renders the fields, writes user input into the controller
/// through its bindings, and calls [`FormController::submit`] when the user
/// asks to submit. It returns when the user closes the form.
pub trait FormBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    fn run<T: Form>(
        &self,
        controller: &mut FormController<T>,
        on_submit: &mut dyn FnMut(T),
    ) -> Result<(), Self::Error>;
}
