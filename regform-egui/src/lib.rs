//! # regform-egui
//!
//! An egui form backend for regform that renders the form in a desktop
//! window.
//!
//! This backend uses the `eframe` and `egui` crates. All fields are shown at
//! once, side by side in the form's rows, and can be edited in any order.
//! Pressing the submit button validates the whole form; errors appear under
//! the offending fields. Closing the window ends the form.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use regform::{Form, RegistrationDraft, log_registration};
//! use regform_egui::EguiBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let backend = EguiBackend::new()
//!         .with_title("Registration")
//!         .with_window_size([560.0, 420.0]);
//!
//!     RegistrationDraft::run_with(backend, log_registration)?;
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{EguiBackend, EguiError};
