use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use relmouse::app::{App, AppConfig};
use relmouse::{build_info, health};

/// Relative and absolute mouse input demo
#[derive(Parser)]
#[command(name = "relmouse", version, about)]
struct Cli {
    /// Configuration profile (defaults to APP_PROFILE, then "release")
    #[arg(long)]
    profile: Option<String>,
    /// Run the health checks and exit
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if cli.check {
        let report = health::run_all_checks();
        health::print_report(&report);
        return Ok(ExitCode::from(report.exit_code() as u8));
    }

    info!(version = %build_info::version_string(), "relmouse");

    let config = match cli.profile {
        Some(profile) => AppConfig::load(&profile)
            .with_context(|| format!("failed to load profile '{profile}'"))?,
        None => AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using built-in defaults");
            AppConfig::builtin("release")
        }),
    };

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("event loop failed")?;

    Ok(ExitCode::from(app.exit_code() as u8))
}
