//! Inspect and edit saved settings.

use crate::cli::{ConfigAction, SetArgs};
use crate::error::Result;
use crate::settings::Settings;
use crate::ui;

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load()?;
            print!("{}", toml::to_string_pretty(&settings)?);
        }
        ConfigAction::Path => {
            println!("{}", Settings::default_path()?.display());
        }
        ConfigAction::Reset { force } => {
            if !force && !ui::prompt_yes("Restore default settings?") {
                println!("Aborted.");
                return Ok(());
            }
            let path = Settings::default().save()?;
            println!("Settings reset ({}).", path.display());
        }
        ConfigAction::Set(args) => {
            let settings = apply_set(Settings::load()?, &args);
            let path = settings.save()?;
            println!("Saved {}.", path.display());
        }
    }
    Ok(())
}

fn apply_set(mut settings: Settings, args: &SetArgs) -> Settings {
    if let Some(length) = args.length {
        settings.defaults.length = length as usize;
    }
    if let Some(on) = args.digits {
        settings.defaults.include_digits = on;
    }
    if let Some(on) = args.symbols {
        settings.defaults.include_symbols = on;
    }
    if let Some(secs) = args.clear_after {
        settings.clipboard.clear_after_secs = (secs > 0).then_some(secs);
    }
    settings
}
