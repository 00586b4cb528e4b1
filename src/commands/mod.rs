//! Command dispatch layer for ByteGen.
//!
//! This module maps parsed CLI commands to their concrete implementations.
//! Each command lives in its own file and exposes a single `run()` function.

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::settings::Settings;

pub mod config;
pub mod gen_pw;
pub mod interactive;

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Gen(args) => gen_pw::run(args, &load_settings()),
        Commands::Interactive => interactive::run(&load_settings()),
        Commands::Config { action } => config::run(action),
    }
}

/// Saved settings, or defaults if they cannot be read.
///
/// A broken settings file should not stop password generation.
fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "could not load settings, using defaults");
            Settings::default()
        }
    }
}
