//! Ratatui form backend implementation for FormBackend trait.
//!
//! Displays all fields at once, row by row, with keyboard navigation.
//! Field values live in the [`FormController`]; this module only keeps
//! focus, cursor and dropdown state.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use regform::{
    FieldKind, FieldPath, Form, FormBackend, FormController, FormDefinition, FormError,
    SubmitOutcome,
};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::debug;

use crate::draw::draw_form;

/// Error type for the Ratatui form backend.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The form rejected a write or could not build its value.
    #[error("Form error: {0}")]
    Form(#[from] FormError),
}

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub text: Color,
    pub placeholder: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            text: Color::White,
            placeholder: Color::DarkGray,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Ratatui form backend that displays all fields at once.
#[derive(Debug, Clone, Default)]
pub struct RatatuiFormBackend {
    /// Title shown at the top of the form; the form's own title if unset.
    title: Option<String>,
    /// Color theme for the UI.
    theme: Theme,
}

impl RatatuiFormBackend {
    /// Create a new Ratatui form backend with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title shown at the top of the form.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFormError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiFormError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn event_loop<T: Form>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        state: &mut FormState,
        controller: &mut FormController<T>,
        on_submit: &mut dyn FnMut(T),
    ) -> Result<(), RatatuiFormError> {
        loop {
            terminal.draw(|frame| draw_form(frame, state, controller))?;

            if let Event::Key(key) = event::read()?
                && state.handle_key(key, controller, on_submit)? == Flow::Quit
            {
                return Ok(());
            }
        }
    }
}

/// Which element has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    /// A field, by index in reading order.
    Field(usize),
    Submit,
}

/// Whether the event loop keeps going after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Per-field UI state.
#[derive(Debug, Clone)]
pub(crate) struct FieldCursor {
    pub(crate) path: FieldPath,
    pub(crate) is_select: bool,
    /// Cursor position in characters (text fields).
    pub(crate) cursor: usize,
    /// Highlighted option while the dropdown is open (selects).
    pub(crate) highlight: usize,
}

/// Rows moved by PageUp/PageDown in an open dropdown.
const PAGE: usize = 10;

/// State for the entire form, apart from the values themselves.
pub(crate) struct FormState {
    pub(crate) fields: Vec<FieldCursor>,
    pub(crate) focus: Focus,
    pub(crate) dropdown_open: bool,
    pub(crate) title: String,
    pub(crate) theme: Theme,
}

impl FormState {
    pub(crate) fn new(definition: &FormDefinition, title: Option<String>, theme: Theme) -> Self {
        let fields = definition
            .fields()
            .map(|field| FieldCursor {
                path: field.path().clone(),
                is_select: field.is_select(),
                cursor: 0,
                highlight: 0,
            })
            .collect::<Vec<_>>();

        let focus = if fields.is_empty() {
            Focus::Submit
        } else {
            Focus::Field(0)
        };

        Self {
            fields,
            focus,
            dropdown_open: false,
            title: title.unwrap_or_else(|| definition.title.clone()),
            theme,
        }
    }

    pub(crate) fn focused_idx(&self) -> Option<usize> {
        match self.focus {
            Focus::Field(idx) => Some(idx),
            Focus::Submit => None,
        }
    }

    fn focused_field(&self) -> Option<&FieldCursor> {
        self.focused_idx().and_then(|idx| self.fields.get(idx))
    }

    fn on_select(&self) -> bool {
        self.focused_field().is_some_and(|f| f.is_select)
    }

    fn next_field(&mut self) {
        self.focus = match self.focus {
            Focus::Field(idx) if idx + 1 < self.fields.len() => Focus::Field(idx + 1),
            // No more fields, focus the submit button
            Focus::Field(_) | Focus::Submit => Focus::Submit,
        };
    }

    fn prev_field(&mut self) {
        self.focus = match self.focus {
            Focus::Submit if !self.fields.is_empty() => Focus::Field(self.fields.len() - 1),
            Focus::Field(idx) if idx > 0 => Focus::Field(idx - 1),
            other => other,
        };
    }

    pub(crate) fn handle_key<T: Form>(
        &mut self,
        key: KeyEvent,
        controller: &mut FormController<T>,
        on_submit: &mut dyn FnMut(T),
    ) -> Result<Flow, FormError> {
        if key.kind != KeyEventKind::Press {
            return Ok(Flow::Continue);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Chords that work everywhere, including inside an open dropdown
        match key.code {
            KeyCode::Char('c') if ctrl => return Ok(Flow::Quit),
            KeyCode::Char('s') if ctrl => {
                self.submit(controller, on_submit)?;
                return Ok(Flow::Continue);
            }
            KeyCode::F(10) => {
                self.submit(controller, on_submit)?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        if self.dropdown_open {
            self.handle_dropdown_key(key, controller)?;
            return Ok(Flow::Continue);
        }

        match key.code {
            KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Enter | KeyCode::Char(' ') if self.focus == Focus::Submit => {
                self.submit(controller, on_submit)?
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.on_select() => self.open_dropdown(controller),
            KeyCode::Enter => self.next_field(),
            KeyCode::BackTab => self.prev_field(),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.prev_field(),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::Up => self.prev_field(),
            KeyCode::Left if ctrl => self.prev_field(),
            KeyCode::Right if ctrl => self.next_field(),
            KeyCode::Left => self.edit_text(controller, |_, cursor| {
                *cursor = cursor.saturating_sub(1);
            })?,
            KeyCode::Right => self.edit_text(controller, |value, cursor| {
                *cursor = (*cursor + 1).min(value.chars().count());
            })?,
            KeyCode::Home => self.edit_text(controller, |_, cursor| *cursor = 0)?,
            KeyCode::End => self.edit_text(controller, |value, cursor| {
                *cursor = value.chars().count();
            })?,
            KeyCode::Backspace => self.edit_text(controller, |value, cursor| {
                if *cursor > 0 {
                    *cursor -= 1;
                    value.remove(byte_index(value, *cursor));
                }
            })?,
            KeyCode::Delete => self.edit_text(controller, |value, cursor| {
                if *cursor < value.chars().count() {
                    value.remove(byte_index(value, *cursor));
                }
            })?,
            KeyCode::Char(c) if !ctrl => self.edit_text(controller, |value, cursor| {
                value.insert(byte_index(value, *cursor), c);
                *cursor += 1;
            })?,
            _ => {}
        }

        Ok(Flow::Continue)
    }

    fn handle_dropdown_key<T: Form>(
        &mut self,
        key: KeyEvent,
        controller: &mut FormController<T>,
    ) -> Result<(), FormError> {
        let Some(idx) = self.focused_idx() else {
            self.dropdown_open = false;
            return Ok(());
        };
        let field = &mut self.fields[idx];
        let options = controller
            .definition()
            .field(&field.path)
            .map(|f| f.options().to_vec())
            .unwrap_or_default();
        let last = options.len().saturating_sub(1);

        match key.code {
            KeyCode::Esc => self.dropdown_open = false,
            KeyCode::Up => field.highlight = field.highlight.saturating_sub(1),
            KeyCode::Down => field.highlight = (field.highlight + 1).min(last),
            KeyCode::PageUp => field.highlight = field.highlight.saturating_sub(PAGE),
            KeyCode::PageDown => field.highlight = (field.highlight + PAGE).min(last),
            KeyCode::Home => field.highlight = 0,
            KeyCode::End => field.highlight = last,
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(option) = options.get(field.highlight) {
                    debug!(field = %field.path, value = %option.value, "option chosen");
                    controller
                        .control(field.path.clone())?
                        .on_change(option.value.clone())?;
                }
                self.dropdown_open = false;
            }
            KeyCode::Tab => {
                self.dropdown_open = false;
                self.next_field();
            }
            _ => {}
        }
        Ok(())
    }

    fn open_dropdown<T: Form>(&mut self, controller: &FormController<T>) {
        let Some(idx) = self.focused_idx() else {
            return;
        };
        let field = &mut self.fields[idx];
        // Start on the current choice, or the first option
        let kind = controller.definition().field(&field.path).map(|f| f.kind());
        field.highlight = match (kind, controller.value(&field.path)) {
            (Some(FieldKind::Select(select)), Some(value)) => select.position(value).unwrap_or(0),
            _ => 0,
        };
        self.dropdown_open = true;
    }

    /// Apply `edit` to the focused text field's value and cursor, writing
    /// the value back through the field's binding if it changed.
    fn edit_text<T: Form>(
        &mut self,
        controller: &mut FormController<T>,
        edit: impl FnOnce(&mut String, &mut usize),
    ) -> Result<(), FormError> {
        let Some(idx) = self.focused_idx() else {
            return Ok(());
        };
        let field = &mut self.fields[idx];
        if field.is_select {
            return Ok(());
        }

        let before = controller.value(&field.path).unwrap_or_default();
        let mut value = before.to_string();
        let mut cursor = field.cursor.min(value.chars().count());
        edit(&mut value, &mut cursor);
        field.cursor = cursor;

        if value != before {
            controller.register(field.path.clone())?.set(value);
        }
        Ok(())
    }

    fn submit<T: Form>(
        &mut self,
        controller: &mut FormController<T>,
        on_submit: &mut dyn FnMut(T),
    ) -> Result<(), FormError> {
        self.dropdown_open = false;
        match controller.submit(|value| on_submit(value))? {
            SubmitOutcome::Submitted => {}
            SubmitOutcome::Rejected(errors) => {
                // Focus the first field with an error
                if let Some(idx) = self.fields.iter().position(|f| errors.contains(&f.path)) {
                    self.focus = Focus::Field(idx);
                }
            }
        }
        Ok(())
    }
}

/// Byte offset of the character at `char_pos`, or the end of the string.
fn byte_index(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

impl FormBackend for RatatuiFormBackend {
    type Error = RatatuiFormError;

    fn run<T: Form>(
        &self,
        controller: &mut FormController<T>,
        on_submit: &mut dyn FnMut(T),
    ) -> Result<(), Self::Error> {
        let mut state = FormState::new(
            controller.definition(),
            self.title.clone(),
            self.theme.clone(),
        );

        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, &mut state, controller, on_submit);
        self.restore_terminal(&mut terminal)?;
        result
    }
}
