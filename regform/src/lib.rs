//! # regform
//!
//! A registration form (first name, last name, company, email and a
//! three-part date of birth) with schema validation. Backend-agnostic.
//!
//! The form is described once, as a [`FormDefinition`] and a [`Schema`],
//! and driven by any [`FormBackend`]: a terminal UI, a desktop window, or
//! the scripted [`TestBackend`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use regform::{Form, RegistrationDraft, log_registration};
//! use regform_ratatui::RatatuiFormBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     RegistrationDraft::run_with(RatatuiFormBackend::new(), log_registration)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Validation
//!
//! Rules run on submit only, over the whole draft:
//! - first name, last name, company, month, day and year must be non-empty
//! - email must look like an email address, and must be non-empty
//!
//! Every violated field gets its first failing message. A valid submit
//! calls the completion handler once and leaves the draft as it is.
//!
//! ## Backends
//!
//! - `regform-ratatui` - Terminal form
//! - `regform-egui` - Desktop window

// Re-export all types from regform-types
pub use regform_types::*;

pub mod options;

mod registration;
pub use registration::{DateOfBirth, RegistrationDraft, log_registration, paths};

// Test backend for testing forms without user interaction
mod test_backend;
pub use test_backend::{Action, TestBackend, TestBackendError};
