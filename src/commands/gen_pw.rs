//! Generate one or more random passwords.

use std::io::{self, Write};

use crate::cli::GenArgs;
use crate::copy::{self, ClipboardWriter, CopyOutcome, SystemClipboard};
use crate::error::Result;
use crate::generator::{self, GenerationConfig, Password};
use crate::settings::Settings;
use crate::ui;

pub fn run(args: GenArgs, settings: &Settings) -> Result<()> {
    let config = resolve_config(&args, &settings.defaults);
    let mut clipboard = SystemClipboard::new(settings.clipboard.clear_after());
    let stdout = io::stdout();
    let stderr = io::stderr();
    generate_and_print(
        &config,
        &args,
        &mut stdout.lock(),
        &mut stderr.lock(),
        &mut clipboard,
    )
}

/// Merge command-line flags over the saved defaults.
///
/// Each character set is decided on its own: `--digits`/`--no-digits`
/// (and the symbol pair) override the setting, no flag keeps it.
pub fn resolve_config(args: &GenArgs, defaults: &GenerationConfig) -> GenerationConfig {
    let length = args
        .length
        .map(|l| l as usize)
        .unwrap_or(defaults.length);

    GenerationConfig::new(
        GenerationConfig::clamp_length(length),
        pick(args.digits, args.no_digits, defaults.include_digits),
        pick(args.symbols, args.no_symbols, defaults.include_symbols),
    )
}

fn pick(on: bool, off: bool, default: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

/// Print passwords to `out`; notices go to `err`.
fn generate_and_print<O, E, C>(
    config: &GenerationConfig,
    args: &GenArgs,
    out: &mut O,
    err: &mut E,
    clipboard: &mut C,
) -> Result<()>
where
    O: Write,
    E: Write,
    C: ClipboardWriter + ?Sized,
{
    tracing::debug!(%config, count = args.count, "generating");

    let mut last: Option<Password> = None;
    for _ in 0..args.count {
        let pwd = generator::generate_with_default_rng(config)?;
        writeln!(out, "{}", pwd)?;
        last = Some(pwd);
    }
    out.flush()?;

    if args.copy {
        if let Some(pwd) = &last {
            match copy::copy_password(pwd, clipboard) {
                CopyOutcome::Copied => ui::finish_pending_clear(err, clipboard)?,
                CopyOutcome::Failed(msg) => writeln!(err, "{}", msg)?,
            }
        }
    }

    Ok(())
}
