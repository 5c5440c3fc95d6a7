use crate::{DraftError, FieldPath};

/// Error type for form operations.
///
/// Validation failures are not errors: they are reported through
/// [`SubmitOutcome::Rejected`](crate::SubmitOutcome). This type covers misuse
/// of the form (binding a field it does not define) and backend failures.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(FieldPath),

    #[error("Field '{0}' is not a text input")]
    NotText(FieldPath),

    #[error("Field '{0}' is not a select")]
    NotSelect(FieldPath),

    #[error("'{value}' is not an option of '{path}'")]
    UnknownOption { path: FieldPath, value: String },

    /// The draft passed validation but could not be turned into the typed
    /// value; the schema and `Form::from_draft` disagree.
    #[error("Validated draft is incomplete: {0}")]
    Draft(#[from] DraftError),

    /// Backend-specific failure (I/O, UI framework crash, etc.)
    #[error("Backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

impl FormError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = FormError::UnknownOption {
            path: FieldPath::new("date_of_birth.month"),
            value: "13".to_string(),
        };
        assert_eq!(err.to_string(), "'13' is not an option of 'date_of_birth.month'");

        let err = FormError::backend(anyhow::anyhow!("terminal gone"));
        assert_eq!(err.to_string(), "Backend error: terminal gone");
    }
}
