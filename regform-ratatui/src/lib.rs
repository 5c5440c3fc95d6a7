//! # regform-ratatui
//!
//! Ratatui form backend for regform.
//!
//! This backend displays every field at once, laid out in the form's rows,
//! with the submit button underneath. Users move between fields with
//! Tab/Shift+Tab or the arrow keys, open selects with Enter or Space, and
//! submit with the button, Ctrl+S or F10. Errors appear under each field
//! after a rejected submit.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use regform::{Form, RegistrationDraft, log_registration};
//! use regform_ratatui::RatatuiFormBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let backend = RatatuiFormBackend::new().with_title("Sign up");
//!     let controller = RegistrationDraft::run_with(backend, log_registration)?;
//!     println!("{} submit attempt(s)", controller.submit_count());
//!     Ok(())
//! }
//! ```

mod backend;
mod draw;

pub use backend::{RatatuiFormBackend, RatatuiFormError, Theme};
