use std::{fs, path::Path};

use anyhow::Result;
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json};

#[derive(Debug, PartialEq, Eq)]
enum InitOutcome {
    AlreadyExists,
    /// Whether the default locale directory is already there.
    Created { locales_found: bool },
}

fn write_default_config(dir: &Path) -> Result<InitOutcome> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Ok(InitOutcome::AlreadyExists);
    }

    fs::write(&config_path, default_config_json()?)?;
    let locales_found = dir.join(Config::default().path).is_dir();
    Ok(InitOutcome::Created { locales_found })
}

fn next_step_hint(locales_found: bool) -> String {
    let config = Config::default();
    if locales_found {
        format!(
            "Run `mfv` to check every locale in `{}/` against `{}`.",
            config.path, config.source_locale
        )
    } else {
        format!(
            "No `{}/` directory here. Set `path` to the directory holding your \
             locale files and `sourceLocale` to the locale you translate from.",
            config.path
        )
    }
}

pub fn init() -> Result<ExitStatus> {
    match write_default_config(Path::new("."))? {
        InitOutcome::AlreadyExists => {
            eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
            Ok(ExitStatus::Failure)
        }
        InitOutcome::Created { locales_found } => {
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", CONFIG_FILE_NAME).green()
            );
            println!("  {}", next_step_hint(locales_found).dimmed());
            Ok(ExitStatus::Success)
        }
    }
}
