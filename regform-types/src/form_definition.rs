use crate::{Field, FieldPath, Row};

/// The layout of a form: a title, rows of fields and a submit label.
///
/// Presentation-agnostic; a terminal renderer and a desktop renderer draw
/// the same definition.
#[derive(Debug, Clone)]
pub struct FormDefinition {
    pub title: String,

    pub rows: Vec<Row>,

    /// Caption of the submit action.
    pub submit_label: String,
}

impl FormDefinition {
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            rows,
            submit_label: "Submit".to_string(),
        }
    }

    /// Set the caption of the submit action.
    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All fields in reading order: row by row, left to right.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.rows.iter().flat_map(|row| row.fields.iter())
    }

    pub fn field(&self, path: &FieldPath) -> Option<&Field> {
        self.fields().find(|f| f.path() == path)
    }

    pub fn len(&self) -> usize {
        self.fields().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_in_reading_order() {
        let definition = FormDefinition::new(
            "Contact",
            vec![
                Row::new(vec![Field::text("a", "A"), Field::text("b", "B")]),
                Row::new(vec![Field::email("c", "C")]),
            ],
        )
        .with_submit_label("Send");

        let paths: Vec<_> = definition.fields().map(|f| f.path().as_str()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
        assert_eq!(definition.len(), 3);
        assert_eq!(definition.submit_label, "Send");
        assert!(definition.field(&FieldPath::new("c")).is_some());
        assert!(definition.field(&FieldPath::new("d")).is_none());
    }
}
