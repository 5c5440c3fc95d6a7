//! Egui backend implementation for FormBackend trait.

use eframe::egui;
use regform::{
    Field, FieldPath, Form, FormBackend, FormController, FormDefinition, FormError, SubmitState,
};
use thiserror::Error;
use tracing::{debug, error};

/// Error type for the Egui backend.
#[derive(Debug, Error)]
pub enum EguiError {
    /// An error occurred in the egui/eframe backend.
    #[error("Egui error: {0}")]
    EguiError(String),

    /// The form rejected a write or could not build its value.
    #[error("Form error: {0}")]
    Form(#[from] FormError),
}

/// Builder/configuration for the Egui backend.
#[derive(Debug, Clone)]
pub struct EguiBackend {
    /// Window title and heading; the form's own title if unset.
    title: Option<String>,
    /// Window size [width, height].
    window_size: [f32; 2],
}

impl Default for EguiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiBackend {
    /// Create a new Egui backend with default settings.
    pub fn new() -> Self {
        Self {
            title: None,
            window_size: [560.0, 420.0],
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the window size.
    pub fn with_window_size(mut self, size: [f32; 2]) -> Self {
        self.window_size = size;
        self
    }
}

/// A change requested by the user during one frame, applied after drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    Text(FieldPath, String),
    Choose(FieldPath, String),
    Submit,
}

/// The egui app; borrows the controller for as long as the window is open.
struct FormApp<'a, T: Form> {
    title: String,
    controller: &'a mut FormController<T>,
    on_submit: &'a mut dyn FnMut(T),
    /// First failed write; closes the window and is returned from `run`.
    failure: &'a mut Option<FormError>,
}

impl<'a, T: Form> FormApp<'a, T> {
    fn new(
        title: String,
        controller: &'a mut FormController<T>,
        on_submit: &'a mut dyn FnMut(T),
        failure: &'a mut Option<FormError>,
    ) -> Self {
        Self {
            title,
            controller,
            on_submit,
            failure,
        }
    }

    fn show(&mut self, ctx: &egui::Context) {
        let edits = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| draw_form(ui, &self.title, self.controller))
                    .inner
            })
            .inner;

        for edit in edits {
            if let Err(err) = self.apply(edit) {
                error!(%err, "form edit failed");
                *self.failure = Some(err);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }
    }

    fn apply(&mut self, edit: Edit) -> Result<(), FormError> {
        match edit {
            Edit::Text(path, value) => self.controller.register(path)?.set(value),
            Edit::Choose(path, value) => self.controller.control(path)?.on_change(value)?,
            Edit::Submit => {
                let on_submit = &mut *self.on_submit;
                self.controller.submit(|value| on_submit(value))?;
            }
        }
        Ok(())
    }
}

impl<T: Form> eframe::App for FormApp<'_, T> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

/// Draw the whole form and collect what the user changed this frame.
fn draw_form<T: Form>(
    ui: &mut egui::Ui,
    title: &str,
    controller: &FormController<T>,
) -> Vec<Edit> {
    let definition: &FormDefinition = controller.definition();
    let mut edits = Vec::new();

    ui.heading(title);
    ui.add_space(12.0);

    for row in definition.rows() {
        ui.columns(row.fields().len(), |columns| {
            for (field, ui) in row.fields().iter().zip(columns.iter_mut()) {
                if let Some(edit) = draw_field(ui, field, controller) {
                    edits.push(edit);
                }
            }
        });
        ui.add_space(8.0);
    }

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(definition.submit_label.as_str()).clicked() {
            edits.push(Edit::Submit);
        }

        match controller.state() {
            SubmitState::Submitted => {
                ui.colored_label(egui::Color32::GREEN, "✓ Registration submitted");
            }
            SubmitState::ErrorsDisplayed => {
                ui.colored_label(
                    egui::Color32::RED,
                    format!("{count} validation error(s)", count = controller.errors().len()),
                );
            }
            SubmitState::Idle | SubmitState::Validating => {}
        }
    });

    edits
}

fn draw_field<T: Form>(
    ui: &mut egui::Ui,
    field: &Field,
    controller: &FormController<T>,
) -> Option<Edit> {
    // Unlabelled fields keep an empty line so the row stays aligned
    ui.label(egui::RichText::new(field.label().unwrap_or(" ")).strong());

    let path = field.path();
    let current = controller.value(path);

    let edit = if field.is_select() {
        let selected_text = current
            .and_then(|value| field.options().iter().find(|o| o.value == value))
            .map(|o| o.label.as_str())
            .unwrap_or(field.placeholder());

        let mut chosen = None;
        egui::ComboBox::from_id_salt(path.as_str())
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for option in field.options() {
                    let is_selected = current == Some(option.value.as_str());
                    let response = ui.selectable_label(is_selected, option.label.as_str());
                    if response.clicked() && !is_selected {
                        chosen = Some(option.value.clone());
                    }
                }
            });
        chosen.map(|value| Edit::Choose(path.clone(), value))
    } else {
        let mut value = current.unwrap_or_default().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut value)
                .hint_text(field.placeholder())
                .desired_width(f32::INFINITY),
        );
        response.changed().then(|| Edit::Text(path.clone(), value))
    };

    if let Some(message) = controller.error(path) {
        ui.label(
            egui::RichText::new(format!("⚠ {message}"))
                .color(egui::Color32::RED)
                .small(),
        );
    }

    edit
}

impl FormBackend for EguiBackend {
    type Error = EguiError;

    fn run<T: Form>(
        &self,
        controller: &mut FormController<T>,
        on_submit: &mut dyn FnMut(T),
    ) -> Result<(), Self::Error> {
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| controller.definition().title.clone());

        // Create native options
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(title.clone())
                .with_inner_size(self.window_size),
            ..Default::default()
        };

        debug!(%title, "opening form window");

        // The app borrows the controller; run_native blocks until the window is closed
        let app_name = title.clone();
        let mut failure = None;
        let failure_slot = &mut failure;
        eframe::run_native(
            &app_name,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(FormApp::new(title, controller, on_submit, failure_slot))
                    as Box<dyn eframe::App + '_>)
            }),
        )
        .map_err(|e| EguiError::EguiError(e.to_string()))?;

        match failure {
            Some(err) => Err(err.into()),
            None => {
                debug!("form window closed");
                Ok(())
            }
        }
    }
}
