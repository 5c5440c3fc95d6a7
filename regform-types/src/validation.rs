use std::collections::HashMap;
use std::fmt;

use crate::FieldPath;

/// One violated rule: which field, and the message to show under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: FieldPath,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<FieldPath>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Every rule a draft violated, in schema order.
///
/// A field may appear more than once when several of its rules fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Reduce the report to one message per field: the first one reported.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for issue in &self.issues {
            if !errors.contains(&issue.path) {
                errors.insert(issue.path.clone(), issue.message.clone());
            }
        }
        errors
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {}: {}", issue.path, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Field path -> message, the content of each field's error slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: HashMap<FieldPath, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<FieldPath>, message: impl Into<String>) {
        self.messages.insert(path.into(), message.into());
    }

    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.messages.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.messages.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.messages.iter().map(|(path, message)| (path, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
