//! Registration form in a desktop window.
//!
//! Run with: cargo run -p regform-egui --example registration

use clap::Parser;
use regform::{Form, RegistrationDraft, log_registration};
use regform_egui::EguiBackend;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Fill in the registration form in a window")]
struct Args {
    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Window width in points
    #[arg(long, default_value_t = 560.0)]
    width: f32,

    /// Window height in points
    #[arg(long, default_value_t = 420.0)]
    height: f32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut backend = EguiBackend::new().with_window_size([args.width, args.height]);
    if let Some(title) = args.title {
        backend = backend.with_title(title);
    }

    let controller = RegistrationDraft::run_with(backend, log_registration)?;
    println!("Closed after {} submit attempt(s)", controller.submit_count());
    Ok(())
}
