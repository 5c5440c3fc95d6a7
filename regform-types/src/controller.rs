//! Form state: the draft, its bindings, and the submit state machine.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, info};

use crate::{
    Draft, FieldErrors, FieldKind, FieldPath, Form, FormDefinition, FormError, Schema,
};

/// Where the form is in its submit cycle.
///
/// `Idle -> Validating -> Submitted | ErrorsDisplayed`. Editing any field
/// after a submit returns the form to `Idle`; nothing else persists between
/// submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    Submitted,
    ErrorsDisplayed,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft was valid and the handler was called once.
    Submitted,

    /// The draft was invalid; the handler was not called.
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

type Listener = Box<dyn FnMut(&FieldPath, &str)>;

/// Owns the draft of one mounted form.
///
/// Created by [`mount`](Self::mount); dropping it unmounts the form.
pub struct FormController<T: Form> {
    definition: FormDefinition,
    schema: Schema,
    /// The draft as it was at mount time, restored by `reset`.
    initial: Draft,
    draft: Draft,
    errors: FieldErrors,
    state: SubmitState,
    submit_count: usize,
    listeners: Vec<Listener>,
    _form: PhantomData<fn() -> T>,
}

impl<T: Form> FormController<T> {
    /// Mount a fresh form: text fields start empty, selects start unset.
    pub fn mount() -> Self {
        let definition = T::definition();
        let schema = T::schema();

        let mut initial = Draft::new();
        for field in definition.fields() {
            if matches!(field.kind(), FieldKind::Text(_)) {
                initial.insert(field.path().clone(), "");
            }
        }

        debug!(title = %definition.title, fields = definition.len(), "form mounted");

        Self {
            definition,
            schema,
            draft: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            state: SubmitState::Idle,
            submit_count: 0,
            listeners: Vec::new(),
            _form: PhantomData,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn value(&self, path: &FieldPath) -> Option<&str> {
        self.draft.get(path)
    }

    /// Errors stored by the last submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The error slot of one field.
    pub fn error(&self, path: &FieldPath) -> Option<&str> {
        self.errors.get(path)
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Number of submit attempts since mount, valid or not.
    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Direct two-way binding for a text field.
    pub fn register(&mut self, path: impl Into<FieldPath>) -> Result<TextBinding<'_, T>, FormError> {
        let path = path.into();
        match self.definition.field(&path).map(|f| f.kind()) {
            Some(FieldKind::Text(_)) => Ok(TextBinding {
                controller: self,
                path,
            }),
            Some(FieldKind::Select(_)) => Err(FormError::NotText(path)),
            None => Err(FormError::UnknownField(path)),
        }
    }

    /// Controlled-field adapter for a select.
    pub fn control(&mut self, path: impl Into<FieldPath>) -> Result<Controlled<'_, T>, FormError> {
        let path = path.into();
        match self.definition.field(&path).map(|f| f.kind()) {
            Some(FieldKind::Select(_)) => Ok(Controlled {
                controller: self,
                path,
            }),
            Some(FieldKind::Text(_)) => Err(FormError::NotSelect(path)),
            None => Err(FormError::UnknownField(path)),
        }
    }

    /// Call `listener` with the path and new value after every field write.
    pub fn watch(&mut self, listener: impl FnMut(&FieldPath, &str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Validate the whole draft and, when it is valid, hand the typed value
    /// to `handler`.
    ///
    /// Errors from a previous submit are replaced, never merged. An invalid
    /// draft is not an error: it yields [`SubmitOutcome::Rejected`].
    pub fn submit(&mut self, handler: impl FnOnce(T)) -> Result<SubmitOutcome, FormError> {
        self.state = SubmitState::Validating;
        self.submit_count += 1;

        match self.schema.validate(&self.draft) {
            Ok(()) => {
                let value = match T::from_draft(&self.draft) {
                    Ok(value) => value,
                    Err(err) => {
                        self.state = SubmitState::Idle;
                        return Err(err.into());
                    }
                };
                self.errors.clear();
                self.state = SubmitState::Submitted;
                info!(attempt = self.submit_count, "form submitted");
                handler(value);
                Ok(SubmitOutcome::Submitted)
            }
            Err(report) => {
                self.errors = report.field_errors();
                self.state = SubmitState::ErrorsDisplayed;
                debug!(
                    attempt = self.submit_count,
                    fields = self.errors.len(),
                    "form rejected"
                );
                Ok(SubmitOutcome::Rejected(self.errors.clone()))
            }
        }
    }

    /// Restore the mount-time draft and clear errors.
    pub fn reset(&mut self) {
        self.draft = self.initial.clone();
        self.errors.clear();
        self.state = SubmitState::Idle;
        debug!("form reset");
    }

    fn write(&mut self, path: &FieldPath, value: String) {
        debug!(field = %path, len = value.len(), "field changed");
        for listener in &mut self.listeners {
            listener(path, &value);
        }
        self.draft.insert(path.clone(), value);
        if matches!(
            self.state,
            SubmitState::Submitted | SubmitState::ErrorsDisplayed
        ) {
            self.state = SubmitState::Idle;
        }
    }
}

impl<T: Form> fmt::Debug for FormController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("title", &self.definition.title)
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .field("state", &self.state)
            .field("submit_count", &self.submit_count)
            .finish_non_exhaustive()
    }
}

/// Two-way binding of a text field: read the current value, write on change.
pub struct TextBinding<'a, T: Form> {
    controller: &'a mut FormController<T>,
    path: FieldPath,
}

impl<T: Form> TextBinding<'_, T> {
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn value(&self) -> &str {
        self.controller.draft.get(&self.path).unwrap_or_default()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.controller.write(&self.path, value.into());
    }
}

/// Controlled-field adapter of a select: the `value`/`on_change` pair.
pub struct Controlled<'a, T: Form> {
    controller: &'a mut FormController<T>,
    path: FieldPath,
}

impl<T: Form> Controlled<'_, T> {
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The selected option value; `None` until something is chosen.
    pub fn value(&self) -> Option<&str> {
        self.controller.draft.get(&self.path)
    }

    /// Select the option carrying `value`.
    pub fn on_change(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        let known = self
            .controller
            .definition
            .field(&self.path)
            .is_some_and(|f| f.options().iter().any(|o| o.value == value));
        if !known {
            return Err(FormError::UnknownOption {
                path: self.path.clone(),
                value,
            });
        }
        self.controller.write(&self.path, value);
        Ok(())
    }
}
