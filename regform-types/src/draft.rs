use std::collections::HashMap;

use crate::FieldPath;

/// Error type for draft access operations.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Missing value for field: {0}")]
    MissingField(FieldPath),
}

/// The in-progress, possibly invalid record of user-entered values.
///
/// Values are keyed by [`FieldPath`] and kept flat: the month of a date of
/// birth lives under `date_of_birth.month`. A field that was never written
/// (an untouched select) is absent rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    values: HashMap<FieldPath, String>,
}

impl Draft {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set the value at the given path, replacing any previous value.
    pub fn insert(&mut self, path: impl Into<FieldPath>, value: impl Into<String>) {
        self.values.insert(path.into(), value.into());
    }

    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.values.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.values.iter().map(|(path, value)| (path, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at `path`, failing if the field was never written.
    ///
    /// Used by [`Form::from_draft`](crate::Form::from_draft) implementations;
    /// after a successful validation every schema field is present.
    pub fn require(&self, path: &FieldPath) -> Result<&str, DraftError> {
        self.get(path)
            .ok_or_else(|| DraftError::MissingField(path.clone()))
    }
}

impl<'a> IntoIterator for &'a Draft {
    type Item = (&'a FieldPath, &'a String);
    type IntoIter = std::collections::hash_map::Iter<'a, FieldPath, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<P: Into<FieldPath>, V: Into<String>> FromIterator<(P, V)> for Draft {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut draft = Draft::new();
        for (path, value) in iter {
            draft.insert(path, value);
        }
        draft
    }
}
