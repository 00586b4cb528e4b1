//! Terminal interaction for ByteGen.
//!
//! This module holds the interactive form: a line-oriented stand-in for a
//! length slider, two toggles and a copy button. It drives a
//! [`GeneratorSession`] and re-renders whenever the session reports a new
//! password. No generation logic lives here.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use rand::Rng;

use crate::copy::{self, ClipboardWriter, CopyOutcome};
use crate::error::{Error, Result};
use crate::generator::{MAX_LENGTH, MIN_LENGTH};
use crate::session::{GeneratorSession, LengthUpdate};

const HELP: &str = "\
Commands:
  l <n>, length <n>   set length (6-15)
  +, -                lengthen / shorten by one
  d, digits           toggle numbers
  s, symbols          toggle characters
  r, regen            new password, same settings
  c, copy             copy password to clipboard
  h, help             show this help
  q, quit             exit";

/// One user action in the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SetLength(String),
    Nudge(isize),
    ToggleDigits,
    ToggleSymbols,
    Regenerate,
    Copy,
    Help,
    Quit,
}

/// Parse a line of input. Blank lines yield `None`.
pub fn parse_action(line: &str) -> Result<Option<Action>> {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.collect::<Vec<_>>().join(" ");

    let action = match cmd.to_lowercase().as_str() {
        "l" | "length" => {
            if arg.is_empty() {
                return Err(Error::invalid("length needs a value"));
            }
            Action::SetLength(arg)
        }
        "+" => Action::Nudge(1),
        "-" => Action::Nudge(-1),
        "d" | "digits" | "numbers" => Action::ToggleDigits,
        "s" | "symbols" | "characters" => Action::ToggleSymbols,
        "r" | "regen" => Action::Regenerate,
        "c" | "copy" => Action::Copy,
        "h" | "help" | "?" => Action::Help,
        "q" | "quit" | "exit" => Action::Quit,
        other => return Err(Error::invalid(format!("unknown command '{other}', try 'help'"))),
    };
    Ok(Some(action))
}

/// Write the current password and controls.
pub fn render<R: Rng, O: Write>(session: &GeneratorSession<R>, out: &mut O) -> io::Result<()> {
    let config = session.config();
    let mark = |on: bool| if on { "x" } else { " " };
    writeln!(out, "Password: {}", session.password())?;
    writeln!(
        out,
        "Length {} [{}-{}]  [{}] Numbers  [{}] Characters",
        config.length,
        MIN_LENGTH,
        MAX_LENGTH,
        mark(config.include_digits),
        mark(config.include_symbols)
    )
}

/// Run the interactive form until `quit` or end of input.
///
/// If a copied password is due to be cleared from the clipboard, this
/// waits for the clear before returning.
///
/// Errors from individual commands (bad length, clipboard failure) are
/// shown as notices and never end the loop. Only I/O errors on `input` or
/// `out` are returned.
pub fn run_form<R, I, O, C>(
    session: &mut GeneratorSession<R>,
    input: I,
    out: &mut O,
    clipboard: &mut C,
) -> Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
    C: ClipboardWriter + ?Sized,
{
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    let listener = session.subscribe(move |_, _| flag.set(true));

    let result = form_loop(session, input, out, clipboard, &dirty);
    session.unsubscribe(listener);
    result?;

    finish_pending_clear(out, clipboard)?;
    Ok(())
}

/// Wait for a scheduled clipboard clear so it is not lost on exit.
pub fn finish_pending_clear<O, C>(out: &mut O, clipboard: &mut C) -> io::Result<()>
where
    O: Write,
    C: ClipboardWriter + ?Sized,
{
    if let Some(delay) = clipboard.pending_clear() {
        writeln!(out, "Clipboard will be cleared in {}s.", delay.as_secs())?;
        out.flush()?;
        clipboard.wait_for_clear();
    }
    Ok(())
}

fn form_loop<R, I, O, C>(
    session: &mut GeneratorSession<R>,
    input: I,
    out: &mut O,
    clipboard: &mut C,
    dirty: &Cell<bool>,
) -> Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
    C: ClipboardWriter + ?Sized,
{
    render(session, out)?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        let action = match parse_action(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                notice(out, &e.to_string())?;
                continue;
            }
        };

        match action {
            Action::Quit => break,
            Action::Help => writeln!(out, "{HELP}")?,
            Action::Copy => match copy::copy_password(session.password(), clipboard) {
                CopyOutcome::Copied => writeln!(out, "Copied.")?,
                CopyOutcome::Failed(msg) => notice(out, &msg)?,
            },
            other => {
                if let Err(e) = apply(session, other, out) {
                    notice(out, &e.to_string())?;
                }
            }
        }

        if dirty.replace(false) {
            render(session, out)?;
        }
    }

    Ok(())
}

fn apply<R: Rng, O: Write>(session: &mut GeneratorSession<R>, action: Action, out: &mut O) -> Result<()> {
    match action {
        Action::SetLength(raw) => {
            if let LengthUpdate::Clamped { requested, applied } = session.set_length_input(&raw)? {
                notice(out, &format!("length {requested} out of range, using {applied}"))?;
            }
        }
        Action::Nudge(delta) => {
            session.nudge_length(delta)?;
        }
        Action::ToggleDigits => {
            session.toggle_digits()?;
        }
        Action::ToggleSymbols => {
            session.toggle_symbols()?;
        }
        Action::Regenerate => {
            session.regenerate()?;
        }
        Action::Copy | Action::Help | Action::Quit => {}
    }
    Ok(())
}

fn notice<O: Write>(out: &mut O, message: &str) -> io::Result<()> {
    writeln!(out, "! {message}")
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is no.
pub fn prompt_yes(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s).ok();
    matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
}
