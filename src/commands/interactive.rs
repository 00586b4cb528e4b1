//! Run the interactive generator on the terminal.

use std::io;

use crate::copy::SystemClipboard;
use crate::error::Result;
use crate::session::GeneratorSession;
use crate::settings::Settings;
use crate::ui;

pub fn run(settings: &Settings) -> Result<()> {
    let mut session = GeneratorSession::mount(settings.defaults)?;
    let mut clipboard = SystemClipboard::new(settings.clipboard.clear_after());

    let stdin = io::stdin();
    let stdout = io::stdout();
    ui::run_form(&mut session, stdin.lock(), &mut stdout.lock(), &mut clipboard)
}
