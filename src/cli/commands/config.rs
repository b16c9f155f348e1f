use crate::config::{Config, check};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

pub struct ConfigArgs<'a> {
    pub print_config: bool,
    pub check: bool,
    pub edit_config: bool,
    pub editor: Option<&'a str>,
}

/// Handle the `config` subcommand
pub fn handle(args: &ConfigArgs<'_>, cfg: &Config) -> AppResult<()> {
    let path = Config::config_file();

    if args.print_config {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
    }

    if args.check {
        if !path.exists() {
            warning(format!(
                "No configuration file at {}; run `emptrack init`.",
                path.display()
            ));
        } else {
            let missing = check::missing_fields(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!("Missing fields: {}", missing.join(", ")));
                let added = check::fill_missing_fields(&path)?;
                success(format!("Added defaults for: {}", added.join(", ")));
            }
        }
    }

    if args.edit_config {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = args
            .editor
            .map(str::to_string)
            .unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
            }
            _ => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));

                match Command::new(&default_editor).arg(&path).status() {
                    Ok(s) if s.success() => info(format!(
                        "Configuration file edited successfully using fallback '{}'",
                        default_editor
                    )),
                    _ => error(format!(
                        "Failed to edit configuration file using fallback '{}'",
                        default_editor
                    )),
                }
            }
        }
    }

    Ok(())
}
