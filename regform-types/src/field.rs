use crate::FieldPath;

/// A single field in a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The path of this field's value in the draft.
    path: FieldPath,

    /// Label rendered above the field. Fields that share a caption (the
    /// three date-of-birth selects) carry it on the first one only.
    label: Option<String>,

    /// Text shown while the field holds no value.
    placeholder: String,

    kind: FieldKind,
}

impl Field {
    pub fn new(path: impl Into<FieldPath>, placeholder: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            label: None,
            placeholder: placeholder.into(),
            kind,
        }
    }

    /// A text input whose label and placeholder are the same string.
    pub fn text(path: impl Into<FieldPath>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(path, label.clone(), FieldKind::Text(TextInput::default())).with_label(label)
    }

    /// An email input whose label and placeholder are the same string.
    pub fn email(path: impl Into<FieldPath>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(path, label.clone(), FieldKind::Text(TextInput::email())).with_label(label)
    }

    /// An unlabelled select.
    pub fn select(
        path: impl Into<FieldPath>,
        placeholder: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(path, placeholder, FieldKind::Select(SelectInput::new(options)))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, FieldKind::Select(_))
    }

    /// The options of a select field; empty for text fields.
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select(select) => &select.options,
            FieldKind::Text(_) => &[],
        }
    }
}

/// The kind of field, determining the widget and how it is bound.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, bound directly through [`TextBinding`](crate::TextBinding).
    Text(TextInput),

    /// A choice from a fixed list, bound through
    /// [`Controlled`](crate::Controlled).
    Select(SelectInput),
}

/// The flavour of a text input. Only affects presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Email,
}

/// Configuration for a text input field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub input_type: InputType,
}

impl TextInput {
    pub fn email() -> Self {
        Self {
            input_type: InputType::Email,
        }
    }
}

/// Configuration for a select field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectInput {
    pub options: Vec<SelectOption>,
}

impl SelectInput {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self { options }
    }

    /// Index of the option carrying `value`, if any.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }
}

/// One entry of a select: the value stored in the draft and the label shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A horizontal group of fields rendered side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub fields: Vec<Field>,
}

impl Row {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_uses_label_as_placeholder() {
        let field = Field::text("first_name", "First Name");
        assert_eq!(field.label(), Some("First Name"));
        assert_eq!(field.placeholder(), "First Name");
        assert!(!field.is_select());
        assert!(field.options().is_empty());
    }

    #[test]
    fn select_has_no_label_by_default() {
        let field = Field::select(
            "date_of_birth.day",
            "Day",
            vec![SelectOption::new("01", "1"), SelectOption::new("02", "2")],
        );
        assert_eq!(field.label(), None);
        assert_eq!(field.options().len(), 2);

        let FieldKind::Select(select) = field.kind() else {
            panic!("expected a select");
        };
        assert_eq!(select.position("02"), Some(1));
        assert_eq!(select.position("32"), None);
    }
}
