//! Registration form in the terminal.
//!
//! Logs go to a file so they don't tear the TUI; each accepted registration
//! is logged there as JSON. Set `RUST_LOG=debug` to see field edits too.

use std::path::PathBuf;

use clap::Parser;
use ratatui::style::Color;
use regform::{Form, RegistrationDraft, log_registration};
use regform_ratatui::{RatatuiFormBackend, Theme};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Fill in the registration form in the terminal")]
struct Args {
    /// Title shown above the form
    #[arg(long)]
    title: Option<String>,

    /// File the log is written to
    #[arg(long, default_value = "registration.log")]
    log_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let directory = args
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = args
        .log_file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("--log-file must name a file"))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let theme = Theme {
        primary: Color::LightBlue,
        ..Theme::default()
    };
    let mut backend = RatatuiFormBackend::new().with_theme(theme);
    if let Some(title) = args.title {
        backend = backend.with_title(title);
    }

    let controller = RegistrationDraft::run_with(backend, log_registration)?;
    tracing::info!(attempts = controller.submit_count(), "form closed");
    println!(
        "Closed after {} submit attempt(s); see {}",
        controller.submit_count(),
        args.log_file.display()
    );
    Ok(())
}
