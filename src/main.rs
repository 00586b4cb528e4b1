//! ByteGen — a minimal random password generator.
//!
//! This file is the application entry point. It is intentionally kept small
//! and is responsible only for:
//!
//! - Parsing CLI arguments
//! - Setting up logging
//! - Dispatching subcommands
//! - Exiting with appropriate status codes
//!
//! All command implementations live in `commands/` and all user interaction
//! helpers live in `ui.rs`.

use std::process::ExitCode;

use bytegen::{cli, commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
