use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use regform::{Field, Form, FormController, SubmitState};

use crate::backend::{FieldCursor, Focus, FormState, Theme};

/// Label line, bordered input box, error line.
const ROW_HEIGHT: u16 = 5;

/// Options visible at once in an open dropdown.
const MAX_DROPDOWN_ROWS: usize = 8;

pub(crate) fn draw_form<T: Form>(
    frame: &mut Frame,
    state: &FormState,
    controller: &FormController<T>,
) {
    let area = frame.area();
    let theme = &state.theme;
    let definition = controller.definition();

    // Main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Title
            Constraint::Min(ROW_HEIGHT),    // Rows
            Constraint::Length(3),          // Submit button
            Constraint::Length(1),          // Status
            Constraint::Length(1),          // Help bar
        ])
        .split(area);

    // Title
    let title = Paragraph::new(state.title.as_str())
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(definition.rows().iter().map(|_| Constraint::Length(ROW_HEIGHT)))
        .split(chunks[1]);

    // Input boxes by field index, for placing the dropdown
    let mut boxes = Vec::with_capacity(state.fields.len());
    let mut field_idx = 0;

    for (row, row_area) in definition.rows().iter().zip(row_areas.iter()) {
        let count = row.fields().len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(row.fields().iter().map(|_| Constraint::Ratio(1, count)))
            .spacing(2)
            .split(*row_area);

        for (field, column) in row.fields().iter().zip(columns.iter()) {
            let is_focused = state.focus == Focus::Field(field_idx);
            let cursor = state.fields.get(field_idx);
            let input_box = draw_field(frame, field, *column, controller, cursor, is_focused, theme);
            boxes.push(input_box);
            field_idx += 1;
        }
    }

    // Submit button
    let submit_focused = state.focus == Focus::Submit;
    let submit_style = if submit_focused {
        Style::default()
            .fg(theme.text)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    };
    let submit_text = if submit_focused {
        format!("  [ {label} ]  ", label = definition.submit_label)
    } else {
        format!("    {label}    ", label = definition.submit_label)
    };
    let submit_button = Paragraph::new(submit_text)
        .style(submit_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if submit_focused {
                    theme.primary
                } else {
                    theme.border
                })),
        );
    frame.render_widget(submit_button, chunks[2]);

    frame.render_widget(status_line(controller, theme), chunks[3]);

    // Help bar
    let help_text = if state.dropdown_open {
        "↑/↓: Choose  PgUp/PgDn: Jump  Enter: Select  Ctrl+S: Submit  Esc: Close"
    } else {
        "Tab: Next  Shift+Tab: Back  Enter: Open/Submit  F10: Submit  Esc: Quit"
    };
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[4]);

    // Drawn last so it overlays the rows below
    if state.dropdown_open
        && let Some(idx) = state.focused_idx()
        && let (Some(field), Some(anchor)) = (definition.fields().nth(idx), boxes.get(idx))
    {
        draw_dropdown(frame, field, &state.fields[idx], *anchor, area, theme);
    }
}

/// Draw one field and return the area of its input box.
fn draw_field<T: Form>(
    frame: &mut Frame,
    field: &Field,
    area: Rect,
    controller: &FormController<T>,
    cursor: Option<&FieldCursor>,
    is_focused: bool,
    theme: &Theme,
) -> Rect {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(3), // Input
            Constraint::Length(1), // Error
        ])
        .split(area);

    let label_style = if is_focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };
    if let Some(label) = field.label() {
        frame.render_widget(Paragraph::new(label).style(label_style), parts[0]);
    }

    let error = controller.error(field.path());
    let border_color = if error.is_some() {
        theme.error
    } else if is_focused {
        theme.primary
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(parts[1]);
    frame.render_widget(block, parts[1]);

    let value = controller.value(field.path()).unwrap_or_default();
    let shown = if field.is_select() {
        field
            .options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or_default()
    } else {
        value
    };

    // Column of the cursor inside a focused text field, in characters
    let cursor_col = match cursor {
        Some(cursor) if is_focused && !field.is_select() => {
            Some(cursor.cursor.min(value.chars().count()))
        }
        _ => None,
    };
    let width = usize::from(inner.width);
    // Scroll long text left so the cursor stays inside the box
    let scroll = match cursor_col {
        Some(col) if width > 0 => col.saturating_sub(width - 1),
        _ => 0,
    };

    let text = if shown.is_empty() {
        Paragraph::new(field.placeholder()).style(Style::default().fg(theme.placeholder))
    } else {
        Paragraph::new(shown)
            .style(Style::default().fg(theme.text))
            .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)))
    };
    frame.render_widget(text, inner);

    if field.is_select() {
        let arrow = Paragraph::new("▼")
            .style(Style::default().fg(theme.border))
            .alignment(Alignment::Right);
        frame.render_widget(arrow, inner);
    } else if let Some(col) = cursor_col
        && width > 0
        && let Ok(x) = u16::try_from(col - scroll)
    {
        frame.set_cursor_position((inner.x + x, inner.y));
    }

    if let Some(error) = error {
        let error_text =
            Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(theme.error));
        frame.render_widget(error_text, parts[2]);
    }

    parts[1]
}

fn draw_dropdown(
    frame: &mut Frame,
    field: &Field,
    cursor: &FieldCursor,
    anchor: Rect,
    bounds: Rect,
    theme: &Theme,
) {
    let options = field.options();
    let popup = dropdown_area(anchor, bounds, options.len());
    if popup.height < 3 {
        return;
    }

    let items: Vec<ListItem> = options
        .iter()
        .map(|o| ListItem::new(o.label.as_str()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(format!(" {placeholder} ", placeholder = field.placeholder())),
        )
        .style(Style::default().fg(theme.text))
        .highlight_style(
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    let mut list_state = ListState::default().with_selected(Some(cursor.highlight));
    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut list_state);
}

/// Place a dropdown of `options` rows under `anchor`, or above it when there
/// is more room there.
fn dropdown_area(anchor: Rect, bounds: Rect, options: usize) -> Rect {
    let wanted = options.min(MAX_DROPDOWN_ROWS) as u16 + 2;
    let below = bounds.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(bounds.y);

    let (y, height) = if below >= wanted || below >= above {
        (anchor.bottom(), wanted.min(below))
    } else {
        let height = wanted.min(above);
        (anchor.y - height, height)
    };

    Rect {
        x: anchor.x,
        y,
        width: anchor.width,
        height,
    }
}

fn status_line<'a, T: Form>(controller: &FormController<T>, theme: &Theme) -> Paragraph<'a> {
    match controller.state() {
        SubmitState::Submitted => Paragraph::new("✓ Registration submitted")
            .style(Style::default().fg(theme.success)),
        SubmitState::ErrorsDisplayed => {
            let count = controller.errors().len();
            let noun = if count == 1 { "field needs" } else { "fields need" };
            Paragraph::new(format!("{count} {noun} attention"))
                .style(Style::default().fg(theme.error))
        }
        SubmitState::Idle | SubmitState::Validating => Paragraph::new(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use regform::{FormController, RegistrationDraft};

    fn render(state: &FormState, controller: &FormController<RegistrationDraft>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| draw_form(frame, state, controller))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.y..area.bottom())
            .map(|y| {
                (area.x..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn mounted() -> (FormState, FormController<RegistrationDraft>) {
        let controller = FormController::<RegistrationDraft>::mount();
        let state = FormState::new(controller.definition(), None, Theme::default());
        (state, controller)
    }

    fn press(
        state: &mut FormState,
        controller: &mut FormController<RegistrationDraft>,
        code: KeyCode,
    ) {
        state
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE), controller, &mut |_| {})
            .unwrap();
    }

    #[test]
    fn renders_layout_with_placeholders() {
        let (state, controller) = mounted();
        let screen = render(&state, &controller);

        for text in [
            "Registration",
            "First Name",
            "Last Name",
            "Email Address",
            "Company",
            "Date of Birth",
            "Month",
            "Day",
            "Year",
            "Register",
        ] {
            assert!(screen.contains(text), "missing {text:?}:\n{screen}");
        }
        assert!(!screen.contains('⚠'));
    }

    #[test]
    fn title_override_replaces_form_title() {
        let controller = FormController::<RegistrationDraft>::mount();
        let state = FormState::new(
            controller.definition(),
            Some("Sign up".into()),
            Theme::default(),
        );
        let screen = render(&state, &controller);
        assert!(screen.contains("Sign up"));
    }

    #[test]
    fn rejected_submit_shows_errors_under_fields() {
        let (mut state, mut controller) = mounted();
        press(&mut state, &mut controller, KeyCode::F(10));
        let screen = render(&state, &controller);

        assert!(screen.contains("⚠ First name is required"));
        assert!(screen.contains("⚠ Last name is required"));
        assert!(screen.contains("⚠ Invalid email address"));
        assert!(screen.contains("⚠ Company is required"));
        assert_eq!(screen.matches("⚠ Required").count(), 3);
        assert!(screen.contains("7 fields need attention"));
    }

    #[test]
    fn chosen_option_shows_its_label() {
        let (mut state, mut controller) = mounted();
        for _ in 0..4 {
            press(&mut state, &mut controller, KeyCode::Tab);
        }
        press(&mut state, &mut controller, KeyCode::Enter);
        let open = render(&state, &controller);
        assert!(open.contains("January"));
        assert!(open.contains("› January"));

        press(&mut state, &mut controller, KeyCode::Down);
        press(&mut state, &mut controller, KeyCode::Enter);
        let closed = render(&state, &controller);
        assert!(closed.contains("February"));
        assert!(!closed.contains("January"));
    }

    #[test]
    fn typed_text_replaces_placeholder() {
        let (mut state, mut controller) = mounted();
        for c in "Ada".chars() {
            press(&mut state, &mut controller, KeyCode::Char(c));
        }
        let screen = render(&state, &controller);
        assert!(screen.contains("│Ada"));
    }

    #[test]
    fn long_text_scrolls_to_keep_the_cursor_visible() {
        let (mut state, mut controller) = mounted();
        for _ in 0..2 {
            press(&mut state, &mut controller, KeyCode::Tab);
        }
        let email = "augusta.ada.king.countess.of.lovelace@analytical-engines.example.com";
        for c in email.chars() {
            press(&mut state, &mut controller, KeyCode::Char(c));
        }

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| draw_form(frame, &state, &controller))
            .unwrap();
        let screen = buffer_text(terminal.backend().buffer());

        // The end of the address is on screen, its start has scrolled away
        assert!(screen.contains("example.com"));
        assert!(!screen.contains("augusta"));

        let cursor = terminal.get_cursor_position().unwrap();
        let line = screen.lines().nth(cursor.y as usize).unwrap();
        let before_cursor: String = line.chars().take(cursor.x as usize).collect();
        assert!(before_cursor.ends_with("example.com"));
    }

    #[test]
    fn dropdown_opens_upwards_near_the_bottom() {
        let bounds = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(0, 18, 20, 3);
        let popup = dropdown_area(anchor, bounds, 31);
        assert_eq!(popup.bottom(), anchor.y);
        assert_eq!(popup.height, 10);

        let anchor = Rect::new(0, 2, 20, 3);
        let popup = dropdown_area(anchor, bounds, 12);
        assert_eq!(popup.y, anchor.bottom());
    }
}
