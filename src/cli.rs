//! Command-line interface definitions for ByteGen.
//!
//! This module defines the public CLI surface of ByteGen using `clap`.
//! It contains no application logic and exists solely to describe how
//! users interact with the program from the terminal.

use clap::{Args, Parser, Subcommand};

use crate::generator::{MAX_LENGTH, MIN_LENGTH};

#[derive(Parser)]
#[command(
    name = "bytegen",
    version,
    about = "A minimal random password generator",
    long_about = r#"
ByteGen generates random passwords from letters, optionally mixed with
digits and symbols. Length is limited to 6-15 characters.

Typical usage:
  bytegen gen
  bytegen gen --length 12 --digits --symbols --copy
  bytegen interactive
  bytegen config set --length 10 --digits true

Generated passwords are never written to disk. Defaults for length and
character sets are read from the settings file (see `bytegen config path`).
"#,
)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a random password
    ///
    /// Options not given on the command line fall back to the saved
    /// settings, and from there to 15 letters-only characters.
    Gen(GenArgs),

    /// Open the interactive generator
    ///
    /// Shows a password and regenerates it every time the length or a
    /// character set is changed. Use `copy` to put it on the clipboard.
    #[command(alias = "ui")]
    Interactive,

    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct GenArgs {
    /// Length of the generated password
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(MIN_LENGTH as u64..=MAX_LENGTH as u64))]
    pub length: Option<u64>,

    /// Include digits (0–9)
    #[arg(short, long, conflicts_with = "no_digits")]
    pub digits: bool,

    /// Leave digits out, even if the settings enable them
    #[arg(long)]
    pub no_digits: bool,

    /// Include symbols (!@#$%^&*(){})
    #[arg(short, long, conflicts_with = "no_symbols")]
    pub symbols: bool,

    /// Leave symbols out, even if the settings enable them
    #[arg(long)]
    pub no_symbols: bool,

    /// Number of passwords to print
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=100))]
    pub count: u64,

    /// Copy the (last) generated password to the clipboard
    ///
    /// If the settings ask for the clipboard to be cleared, the command
    /// waits for that before exiting.
    #[arg(short, long)]
    pub copy: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Print the current settings
    Show,

    /// Print the settings file location
    Path,

    /// Restore default settings
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Change saved defaults
    Set(SetArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct SetArgs {
    /// Default password length
    #[arg(long, value_parser = clap::value_parser!(u64).range(MIN_LENGTH as u64..=MAX_LENGTH as u64))]
    pub length: Option<u64>,

    /// Include digits by default
    #[arg(long)]
    pub digits: Option<bool>,

    /// Include symbols by default
    #[arg(long)]
    pub symbols: Option<bool>,

    /// Seconds before a copied password is cleared (0 disables)
    #[arg(long)]
    pub clear_after: Option<u64>,
}
